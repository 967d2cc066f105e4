//! OS-level prerequisite checks.
//!
//! Two levels:
//! - system: a trusted CA bundle must exist before any download
//! - install: gpg and the platform's distro packages

use crate::download::HttpClient;
use crate::platform::PlatformDefinition;
use std::path::PathBuf;
use swiftly_core::{Error, Fix, ProcessRunner, Result, ToolchainVersion};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// CA bundle locations, one per distribution family.
pub const CA_BUNDLE_PATHS: &[&str] = &[
    "/etc/ssl/certs/ca-certificates.crt",
    "/etc/pki/tls/certs/ca-bundle.crt",
];

/// Key bundle imported before verifying toolchain signatures.
pub const SIGNING_KEYS_URL: &str = "https://www.swift.org/keys/all-keys.asc";

/// A distro package manager that can be queried for installed packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    AptGet,
    Yum,
}

impl PackageManager {
    /// Command used in remediation hints.
    pub fn command(&self) -> &'static str {
        match self {
            Self::AptGet => "apt-get",
            Self::Yum => "yum",
        }
    }

    /// Package providing `gpg`.
    pub fn gpg_package(&self) -> &'static str {
        match self {
            Self::AptGet => "gpg",
            Self::Yum => "gnupg2",
        }
    }

    /// `<manager> -y install <packages…>`
    pub fn install_command<S: AsRef<str>>(&self, packages: &[S]) -> String {
        let packages: Vec<&str> = packages.iter().map(AsRef::as_ref).collect();
        format!("{} -y install {}", self.command(), packages.join(" "))
    }
}

/// Packages a platform needs to build and run Swift code.
#[derive(Debug, Clone, Copy)]
pub struct PlatformPackages {
    /// Platform short id (`PlatformDefinition::name`).
    pub platform: &'static str,
    pub manager: Option<PackageManager>,
    pub packages: &'static [&'static str],
}

const PLATFORM_PACKAGES: &[PlatformPackages] = &[
    PlatformPackages {
        platform: "ubuntu1804",
        manager: Some(PackageManager::AptGet),
        packages: &[
            "binutils",
            "git",
            "libc6-dev",
            "libcurl4-openssl-dev",
            "libedit2",
            "libgcc-5-dev",
            "libpython3.6",
            "libsqlite3-0",
            "libstdc++-5-dev",
            "libxml2",
            "libz3-dev",
            "pkg-config",
            "tzdata",
            "unzip",
            "zlib1g-dev",
        ],
    },
    PlatformPackages {
        platform: "ubuntu2004",
        manager: Some(PackageManager::AptGet),
        packages: &[
            "binutils",
            "git",
            "gnupg2",
            "libc6-dev",
            "libcurl4-openssl-dev",
            "libedit2",
            "libgcc-9-dev",
            "libpython3.8",
            "libsqlite3-0",
            "libstdc++-9-dev",
            "libxml2-dev",
            "libz3-dev",
            "pkg-config",
            "tzdata",
            "unzip",
            "zlib1g-dev",
        ],
    },
    PlatformPackages {
        platform: "ubuntu2204",
        manager: Some(PackageManager::AptGet),
        packages: &[
            "binutils",
            "git",
            "unzip",
            "gnupg2",
            "libc6-dev",
            "libcurl4-openssl-dev",
            "libedit2",
            "libgcc-11-dev",
            "libpython3-dev",
            "libsqlite3-0",
            "libstdc++-11-dev",
            "libxml2-dev",
            "libz3-dev",
            "pkg-config",
            "python3-lldb-13",
            "tzdata",
            "zlib1g-dev",
        ],
    },
    PlatformPackages {
        platform: "amazonlinux2",
        manager: Some(PackageManager::Yum),
        packages: &[
            "binutils",
            "gcc",
            "git",
            "unzip",
            "glibc-static",
            "gzip",
            "libbsd",
            "libcurl-devel",
            "libedit",
            "libicu",
            "libstdc++-static",
            "libuuid",
            "libxml2-devel",
            "tar",
            "tzdata",
            "zlib-devel",
        ],
    },
    PlatformPackages {
        platform: "ubi9",
        manager: Some(PackageManager::Yum),
        packages: &[
            "binutils",
            "gcc",
            "gcc-c++",
            "git",
            "unzip",
            "libcurl-devel",
            "libedit-devel",
            "libicu-devel",
            "sqlite-devel",
            "libuuid-devel",
            "libxml2-devel",
            "python3-devel",
        ],
    },
];

/// Look up the package table for a platform.
///
/// Unknown platforms get no manager and no packages.
pub fn platform_packages(platform_name: &str) -> PlatformPackages {
    PLATFORM_PACKAGES
        .iter()
        .find(|p| p.platform == platform_name)
        .copied()
        .unwrap_or(PlatformPackages {
            platform: "",
            manager: None,
            packages: &[],
        })
}

/// Whether `dpkg -l` output lists `package` as installed (`ii` state).
pub fn dpkg_lists_installed(stdout: &str, package: &str) -> bool {
    stdout.lines().any(|line| {
        let mut fields = line.split_whitespace();
        line.starts_with("ii ")
            && fields.next() == Some("ii")
            && fields
                .next()
                .and_then(|name| name.split(':').next())
                .is_some_and(|name| name == package)
    })
}

/// Runs prerequisite checks.
///
/// The signing-key refresh happens at most once per checker; seed
/// `keys_refreshed` to carry that state across checkers.
pub struct PrerequisiteChecker<'a> {
    runner: &'a dyn ProcessRunner,
    http: &'a dyn HttpClient,
    ca_bundles: Vec<PathBuf>,
    keys_refreshed: bool,
}

impl<'a> PrerequisiteChecker<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, http: &'a dyn HttpClient) -> Self {
        Self {
            runner,
            http,
            ca_bundles: CA_BUNDLE_PATHS.iter().map(PathBuf::from).collect(),
            keys_refreshed: false,
        }
    }

    /// Override the CA bundle locations.
    pub fn with_ca_bundles<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.ca_bundles = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Seed the "signing keys already refreshed" state.
    pub fn with_keys_refreshed(mut self, refreshed: bool) -> Self {
        self.keys_refreshed = refreshed;
        self
    }

    pub fn keys_refreshed(&self) -> bool {
        self.keys_refreshed
    }

    /// Fail unless a CA bundle is present.
    pub fn check_system_prerequisites(&self) -> Result<()> {
        if let Some(found) = self.ca_bundles.iter().find(|p| p.exists()) {
            debug!("Found CA bundle at {}", found.display());
            return Ok(());
        }

        Err(Error::prerequisite(
            "No trusted CA certificate bundle found; downloads cannot be verified",
            Fix::new(format!(
                "Install your distribution's CA certificates package so one of {} exists",
                self.ca_bundles
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" or ")
            )),
        ))
    }

    /// Check install prerequisites for `platform`.
    ///
    /// Returns the command that installs any missing distro packages, or
    /// `None` when nothing is missing or the platform has no known manager.
    #[instrument(skip(self, platform, version), fields(platform = %platform.name, version = %version))]
    pub async fn check_install_prerequisites(
        &mut self,
        platform: &PlatformDefinition,
        version: &ToolchainVersion,
        require_signature: bool,
    ) -> Result<Option<String>> {
        if require_signature {
            self.check_signing_tool(platform).await?;
            self.refresh_signing_keys().await?;
        }

        self.package_remediation(platform).await
    }

    /// Fail unless `gpg` can be run.
    pub async fn check_signing_tool(&self, platform: &PlatformDefinition) -> Result<()> {
        let runnable = match self.runner.run("gpg", &["--version"]).await {
            Ok(output) => output.success(),
            Err(Error::ToolMissing { .. }) => false,
            Err(e) => return Err(e),
        };
        if runnable {
            return Ok(());
        }

        let fix = match platform_packages(&platform.name).manager {
            Some(m) => Fix::with_command("Install GnuPG", m.install_command(&[m.gpg_package()])),
            None => Fix::new("Install GnuPG (gpg) with your system package manager"),
        };
        Err(Error::prerequisite(
            "gpg is required to verify toolchain signatures",
            fix,
        ))
    }

    /// Command installing the platform's missing distro packages, if any.
    pub async fn package_remediation(&self, platform: &PlatformDefinition) -> Result<Option<String>> {
        let table = platform_packages(&platform.name);
        let Some(manager) = table.manager else {
            debug!("No package manager known for {}", platform.name);
            return Ok(None);
        };

        let mut missing = Vec::new();
        for package in table.packages {
            if !self.is_installed(manager, package).await? {
                debug!("Package {} is not installed", package);
                missing.push(*package);
            }
        }

        if missing.is_empty() {
            Ok(None)
        } else {
            Ok(Some(manager.install_command(&missing)))
        }
    }

    async fn refresh_signing_keys(&mut self) -> Result<()> {
        if self.keys_refreshed {
            debug!("Signing keys already refreshed");
            return Ok(());
        }

        info!("Refreshing Swift signing keys");
        let keys = NamedTempFile::new()
            .map_err(|e| Error::io("failed to create temporary file", std::env::temp_dir(), e))?;
        self.http.download_file(SIGNING_KEYS_URL, keys.path()).await?;

        let path = keys.path().to_string_lossy().to_string();
        self.runner.run_checked("gpg", &["--import", &path]).await?;

        self.keys_refreshed = true;
        Ok(())
    }

    async fn is_installed(&self, manager: PackageManager, package: &str) -> Result<bool> {
        match manager {
            PackageManager::AptGet => {
                let output = self.runner.run("dpkg", &["-l", package]).await?;
                Ok(output.success() && dpkg_lists_installed(&output.stdout, package))
            }
            PackageManager::Yum => {
                let output = self
                    .runner
                    .run("yum", &["list", "installed", package])
                    .await?;
                Ok(output.success())
            }
        }
    }
}
