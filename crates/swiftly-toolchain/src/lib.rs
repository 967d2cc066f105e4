//! Swift toolchain management for swiftly.
//!
//! This crate handles:
//! - Classifying the host into a supported platform
//! - Checking OS prerequisites (CA bundle, gpg, distro packages)
//! - Downloading, verifying, and extracting toolchain archives
//! - Switching the toolchain in use through the shared bin directory

pub mod activate;
pub mod detect;
pub mod download;
pub mod extract;
pub mod install;
pub mod manifest;
pub mod os_release;
pub mod platform;
pub mod prerequisites;

#[cfg(test)]
mod testing;

pub use activate::Activator;
pub use detect::{PlatformDetector, classify, platform_from_hint};
pub use download::{HttpClient, ReqwestClient};
pub use extract::{extract_archive, strip_top_level};
pub use install::{InstallOptions, InstallOutcome, Installer, uninstall};
pub use manifest::{InstalledToolchain, Manifest};
pub use os_release::OsRelease;
pub use platform::{Arch, PLATFORM_HINTS, PlatformDefinition};
pub use prerequisites::{PackageManager, PrerequisiteChecker};
