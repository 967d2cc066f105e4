//! Supported platforms and download locations for Swift toolchains.

use serde::{Deserialize, Serialize};
use swiftly_core::ToolchainVersion;

/// Base URL for toolchain downloads.
pub const DOWNLOAD_BASE_URL: &str = "https://download.swift.org";

/// Platform hint values accepted on the command line and in config.
pub const PLATFORM_HINTS: &[&str] = &[
    "ubuntu22.04",
    "ubuntu20.04",
    "ubuntu18.04",
    "amazonlinux2",
    "rhel9",
];

/// A supported Linux platform.
///
/// Two definitions are equal when their `name` matches.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct PlatformDefinition {
    /// Short identifier, used in download directory names (`ubuntu2204`).
    pub name: String,
    /// Canonical identifier, used in archive names (`ubuntu22.04`).
    pub name_full: String,
    /// Human-readable name (`Ubuntu 22.04`).
    pub name_pretty: String,
}

impl PartialEq for PlatformDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl PlatformDefinition {
    fn new(name: &str, name_full: &str, name_pretty: &str) -> Self {
        Self {
            name: name.to_string(),
            name_full: name_full.to_string(),
            name_pretty: name_pretty.to_string(),
        }
    }

    pub fn ubuntu2204() -> Self {
        Self::new("ubuntu2204", "ubuntu22.04", "Ubuntu 22.04")
    }

    pub fn ubuntu2004() -> Self {
        Self::new("ubuntu2004", "ubuntu20.04", "Ubuntu 20.04")
    }

    pub fn ubuntu1804() -> Self {
        Self::new("ubuntu1804", "ubuntu18.04", "Ubuntu 18.04")
    }

    pub fn amazonlinux2() -> Self {
        Self::new("amazonlinux2", "amazonlinux2", "Amazon Linux 2")
    }

    pub fn rhel9() -> Self {
        Self::new("ubi9", "ubi9", "RHEL 9")
    }

    /// Look up a platform by its hint value (see [`PLATFORM_HINTS`]).
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "ubuntu22.04" => Some(Self::ubuntu2204()),
            "ubuntu20.04" => Some(Self::ubuntu2004()),
            "ubuntu18.04" => Some(Self::ubuntu1804()),
            "amazonlinux2" => Some(Self::amazonlinux2()),
            "rhel9" => Some(Self::rhel9()),
            _ => None,
        }
    }

    /// Platforms offered by the manual selection menu, in menu order.
    pub fn manual_choices() -> [Self; 5] {
        [
            Self::ubuntu2204(),
            Self::ubuntu2004(),
            Self::ubuntu1804(),
            Self::rhel9(),
            Self::amazonlinux2(),
        ]
    }
}

impl std::fmt::Display for PlatformDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name_pretty)
    }
}

/// CPU architectures toolchains are published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    /// Detect the current architecture.
    pub fn current() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86_64" => Some(Self::X86_64),
            "aarch64" => Some(Self::Aarch64),
            _ => None,
        }
    }

    /// Suffix appended to platform names in download paths.
    pub fn url_suffix(&self) -> &'static str {
        match self {
            Self::X86_64 => "",
            Self::Aarch64 => "-aarch64",
        }
    }
}

/// Release directory and toolchain identifier on the download server.
fn release_coordinates(version: &ToolchainVersion) -> (String, String) {
    match version {
        ToolchainVersion::Stable {
            major,
            minor,
            patch,
        } => {
            let tag = if *patch == 0 {
                format!("{}.{}", major, minor)
            } else {
                format!("{}.{}.{}", major, minor, patch)
            };
            (
                format!("swift-{}-release", tag),
                format!("swift-{}-RELEASE", tag),
            )
        }
        ToolchainVersion::ReleaseSnapshot { major, minor, date } => (
            format!("swift-{}.{}-branch", major, minor),
            format!("swift-{}.{}-DEVELOPMENT-SNAPSHOT-{}-a", major, minor, date),
        ),
        ToolchainVersion::MainSnapshot { date } => (
            "development".to_string(),
            format!("swift-DEVELOPMENT-SNAPSHOT-{}-a", date),
        ),
    }
}

/// Construct the expected archive filename.
pub fn toolchain_archive_filename(
    version: &ToolchainVersion,
    platform: &PlatformDefinition,
    arch: Arch,
) -> String {
    let (_, id) = release_coordinates(version);
    format!("{}-{}{}.tar.gz", id, platform.name_full, arch.url_suffix())
}

/// Construct the toolchain download URL for a version and platform.
pub fn toolchain_download_url(
    version: &ToolchainVersion,
    platform: &PlatformDefinition,
    arch: Arch,
) -> String {
    let (dir, id) = release_coordinates(version);
    format!(
        "{base}/{dir}/{platform}{arch}/{id}/{file}",
        base = DOWNLOAD_BASE_URL,
        dir = dir,
        platform = platform.name,
        arch = arch.url_suffix(),
        id = id,
        file = toolchain_archive_filename(version, platform, arch),
    )
}

/// Construct the detached signature URL for a toolchain archive.
pub fn signature_url(archive_url: &str) -> String {
    format!("{}.sig", archive_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_name() {
        let mut renamed = PlatformDefinition::ubuntu2204();
        renamed.name_pretty = "Jammy".to_string();
        assert_eq!(renamed, PlatformDefinition::ubuntu2204());
        assert_ne!(PlatformDefinition::ubuntu2204(), PlatformDefinition::ubuntu2004());
    }

    #[test]
    fn test_every_hint_resolves() {
        for hint in PLATFORM_HINTS {
            assert!(PlatformDefinition::from_hint(hint).is_some(), "{}", hint);
        }
        assert_eq!(
            PlatformDefinition::from_hint("rhel9").unwrap().name,
            "ubi9"
        );
        assert!(PlatformDefinition::from_hint("debian12").is_none());
    }

    #[test]
    fn test_manual_choice_order() {
        let names: Vec<_> = PlatformDefinition::manual_choices()
            .iter()
            .map(|p| p.name_pretty.clone())
            .collect();
        assert_eq!(
            names,
            [
                "Ubuntu 22.04",
                "Ubuntu 20.04",
                "Ubuntu 18.04",
                "RHEL 9",
                "Amazon Linux 2"
            ]
        );
    }

    #[test]
    fn test_stable_download_url() {
        let url = toolchain_download_url(
            &ToolchainVersion::stable(5, 10, 1),
            &PlatformDefinition::ubuntu2204(),
            Arch::X86_64,
        );
        assert_eq!(
            url,
            "https://download.swift.org/swift-5.10.1-release/ubuntu2204/swift-5.10.1-RELEASE/swift-5.10.1-RELEASE-ubuntu22.04.tar.gz"
        );
    }

    #[test]
    fn test_stable_zero_patch_uses_short_tag() {
        let url = toolchain_download_url(
            &ToolchainVersion::stable(5, 9, 0),
            &PlatformDefinition::amazonlinux2(),
            Arch::Aarch64,
        );
        assert_eq!(
            url,
            "https://download.swift.org/swift-5.9-release/amazonlinux2-aarch64/swift-5.9-RELEASE/swift-5.9-RELEASE-amazonlinux2-aarch64.tar.gz"
        );
    }

    #[test]
    fn test_snapshot_download_urls() {
        let main = ToolchainVersion::MainSnapshot {
            date: "2024-02-15".to_string(),
        };
        assert_eq!(
            toolchain_download_url(&main, &PlatformDefinition::rhel9(), Arch::X86_64),
            "https://download.swift.org/development/ubi9/swift-DEVELOPMENT-SNAPSHOT-2024-02-15-a/swift-DEVELOPMENT-SNAPSHOT-2024-02-15-a-ubi9.tar.gz"
        );

        let branch = ToolchainVersion::ReleaseSnapshot {
            major: 5,
            minor: 10,
            date: "2024-01-30".to_string(),
        };
        assert_eq!(
            toolchain_download_url(&branch, &PlatformDefinition::ubuntu2004(), Arch::X86_64),
            "https://download.swift.org/swift-5.10-branch/ubuntu2004/swift-5.10-DEVELOPMENT-SNAPSHOT-2024-01-30-a/swift-5.10-DEVELOPMENT-SNAPSHOT-2024-01-30-a-ubuntu20.04.tar.gz"
        );
    }

    #[test]
    fn test_signature_url() {
        assert_eq!(signature_url("https://x/a.tar.gz"), "https://x/a.tar.gz.sig");
    }
}
