//! Toolchain installation and removal.

use crate::activate::Activator;
use crate::download::HttpClient;
use crate::extract::{extract_archive, strip_top_level};
use crate::manifest::Manifest;
use crate::platform::{
    Arch, PlatformDefinition, signature_url, toolchain_archive_filename, toolchain_download_url,
};
use std::fs;
use std::path::Path;
use swiftly_config::SwiftlyPaths;
use swiftly_config::paths::ensure_dir;
use swiftly_core::{Error, Fix, ProcessRunner, Result, ToolchainVersion};
use swiftly_ui::{Output, Printer, Prompt, Spinner};
use tracing::{debug, info, instrument};

/// What to install and how.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub version: ToolchainVersion,
    pub platform: PlatformDefinition,
    pub arch: Arch,
    /// Download the detached signature and check it with gpg.
    pub verify_signature: bool,
    /// Switch to the toolchain even if another one is in use.
    pub use_after: bool,
}

/// Result of an install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Installed { activated: bool },
}

/// Installs and removes toolchains under the swiftly home directory.
pub struct Installer<'a> {
    paths: SwiftlyPaths,
    runner: &'a dyn ProcessRunner,
    http: &'a dyn HttpClient,
    printer: Printer,
}

impl<'a> Installer<'a> {
    pub fn new(
        paths: SwiftlyPaths,
        runner: &'a dyn ProcessRunner,
        http: &'a dyn HttpClient,
        printer: Printer,
    ) -> Self {
        Self {
            paths,
            runner,
            http,
            printer,
        }
    }

    /// Download, verify, and extract a toolchain, then record it.
    ///
    /// The new toolchain is put in use when nothing else is, or when
    /// `use_after` is set.
    #[instrument(skip(self, options, prompt), fields(version = %options.version, platform = %options.platform.name))]
    pub async fn install(
        &self,
        options: &InstallOptions,
        prompt: &mut dyn Prompt,
    ) -> Result<InstallOutcome> {
        let version = &options.version;
        let home = &self.paths.home_dir;
        let mut manifest = Manifest::load(home)?;
        let install_dir = self.paths.toolchain_dir(&version.name());

        if manifest.is_installed(version) && install_dir.is_dir() {
            info!("{} is already installed", version);
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        ensure_dir(&self.paths.toolchains_dir())?;

        // Everything downloaded lives here and is removed on every exit path.
        let scratch = tempfile::Builder::new()
            .prefix("swiftly-")
            .tempdir()
            .map_err(|e| Error::io("failed to create temporary directory", std::env::temp_dir(), e))?;

        let url = toolchain_download_url(version, &options.platform, options.arch);
        let archive_name = toolchain_archive_filename(version, &options.platform, options.arch);
        let archive = scratch.path().join(&archive_name);

        self.http.download_file(&url, &archive).await?;

        if options.verify_signature {
            let signature = scratch.path().join(format!("{}.sig", archive_name));
            self.http
                .download_file(&signature_url(&url), &signature)
                .await?;
            self.verify_signature(&archive, &signature).await?;
        } else {
            debug!("Skipping signature verification");
        }

        if install_dir.exists() {
            debug!("Removing leftover {}", install_dir.display());
            fs::remove_dir_all(&install_dir)
                .map_err(|e| Error::io("failed to remove partial install", &install_dir, e))?;
        }

        let spinner = Spinner::new(format!("Extracting Swift {}...", version), self.printer);
        match extract_archive(&archive, &install_dir, strip_top_level) {
            Ok(_) => spinner.succeed(format!("Extracted Swift {}", version)),
            Err(e) => {
                spinner.fail(format!("Failed to extract Swift {}", version));
                let _ = fs::remove_dir_all(&install_dir);
                return Err(e);
            }
        }

        manifest.add(version.clone());
        if manifest.platform.is_none() {
            manifest.platform = Some(options.platform.clone());
        }
        manifest.save(home)?;

        let activated = if options.use_after || manifest.in_use.is_none() {
            let current = manifest.in_use.clone();
            let used = activator(&self.paths, self.printer)
                .use_toolchain(version, current.as_ref(), prompt)?;
            if used {
                manifest.in_use = Some(version.clone());
            } else {
                // Declining still leaves the previous toolchain unlinked.
                manifest.in_use = None;
            }
            manifest.save(home)?;
            used
        } else {
            false
        };

        info!("Swift {} installed", version);
        Ok(InstallOutcome::Installed { activated })
    }

    async fn verify_signature(&self, archive: &Path, signature: &Path) -> Result<()> {
        let spinner = Spinner::new("Verifying toolchain signature...", self.printer);

        let signature_arg = signature.to_string_lossy().to_string();
        let archive_arg = archive.to_string_lossy().to_string();
        let output = self
            .runner
            .run("gpg", &["--verify", &signature_arg, &archive_arg])
            .await?;

        if output.success() {
            spinner.succeed("Signature verified");
            return Ok(());
        }

        spinner.fail("Signature verification failed");
        Err(Error::CommandFailed {
            command: format!("gpg --verify {} {}", signature_arg, archive_arg),
            exit_code: Some(output.exit_code),
            stdout: output.stdout,
            stderr: output.stderr,
            fixes: vec![
                Fix::new("The download may be corrupt or tampered with; try installing again"),
                Fix::new("Pass --no-verify to skip signature verification"),
            ],
        })
    }
}

/// Remove a toolchain, unlinking it first if it is in use.
///
/// Returns `false` when the toolchain is not installed. A toolchain whose
/// directory is already gone is only dropped from the manifest.
#[instrument(skip(paths, printer, version), fields(version = %version))]
pub fn uninstall(paths: &SwiftlyPaths, printer: Printer, version: &ToolchainVersion) -> Result<bool> {
    let home = &paths.home_dir;
    let mut manifest = Manifest::load(home)?;
    let install_dir = paths.toolchain_dir(&version.name());

    if !manifest.is_installed(version) && !install_dir.exists() {
        return Ok(false);
    }

    if manifest.in_use.as_ref() == Some(version) {
        if install_dir.is_dir() {
            activator(paths, printer).unuse(version)?;
        }
        manifest.in_use = None;
    }

    if install_dir.exists() {
        fs::remove_dir_all(&install_dir)
            .map_err(|e| Error::io("failed to remove toolchain", &install_dir, e))?;
    }

    manifest.remove(version);
    manifest.save(home)?;

    info!("Swift {} uninstalled", version);
    Ok(true)
}

fn activator(paths: &SwiftlyPaths, printer: Printer) -> Activator {
    Activator::from_paths(paths).with_output(Output::new(printer))
}
