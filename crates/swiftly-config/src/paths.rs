//! Filesystem layout.
//!
//! - home: `~/.local/share/swiftly` (Linux data dir)
//! - toolchains: `<home>/toolchains/<name>/usr/bin/*`
//! - shared bin: `~/.local/bin`

use directories::BaseDirs;
use std::path::{Path, PathBuf};
use swiftly_core::{EnvVars, Error, Result};
use tracing::debug;

use crate::{GlobalConfig, TOOLCHAINS_DIR_NAME};

/// Resolved swiftly directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftlyPaths {
    /// State directory (manifest, toolchains).
    pub home_dir: PathBuf,
    /// Shared symlink directory placed on `PATH`.
    pub bin_dir: PathBuf,
}

impl SwiftlyPaths {
    /// Build paths from explicit directories.
    pub fn new(home_dir: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            bin_dir: bin_dir.into(),
        }
    }

    /// Resolve directories from the environment, then config, then defaults.
    pub fn resolve(config: &GlobalConfig) -> Result<Self> {
        let env_home = std::env::var_os(EnvVars::SWIFTLY_HOME_DIR).map(PathBuf::from);
        let env_bin = std::env::var_os(EnvVars::SWIFTLY_BIN_DIR).map(PathBuf::from);
        Self::resolve_with(env_home, env_bin, config)
    }

    /// Resolve with explicit environment overrides.
    pub fn resolve_with(
        env_home: Option<PathBuf>,
        env_bin: Option<PathBuf>,
        config: &GlobalConfig,
    ) -> Result<Self> {
        let home_dir = match env_home.or_else(|| config.paths.home_dir.clone()) {
            Some(dir) => dir,
            None => default_home_dir()?,
        };
        let bin_dir = match env_bin.or_else(|| config.paths.bin_dir.clone()) {
            Some(dir) => dir,
            None => default_bin_dir()?,
        };

        debug!(
            home = %home_dir.display(),
            bin = %bin_dir.display(),
            "Resolved swiftly directories"
        );

        Ok(Self { home_dir, bin_dir })
    }

    /// Root directory whose children are toolchain installations.
    pub fn toolchains_dir(&self) -> PathBuf {
        self.home_dir.join(TOOLCHAINS_DIR_NAME)
    }

    /// Installation root for a toolchain name.
    pub fn toolchain_dir(&self, name: &str) -> PathBuf {
        self.toolchains_dir().join(name)
    }
}

fn base_dirs() -> Result<BaseDirs> {
    BaseDirs::new().ok_or_else(|| Error::config("could not determine home directory"))
}

/// Default swiftly home directory.
pub fn default_home_dir() -> Result<PathBuf> {
    Ok(base_dirs()?.data_dir().join("swiftly"))
}

/// Default shared bin directory.
pub fn default_bin_dir() -> Result<PathBuf> {
    let dirs = base_dirs()?;
    Ok(match dirs.executable_dir() {
        Some(dir) => dir.to_path_buf(),
        None => dirs.home_dir().join(".local").join("bin"),
    })
}

/// Ensure a directory exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        debug!("Creating directory: {}", path.display());
        std::fs::create_dir_all(path)
            .map_err(|e| Error::io(format!("failed to create directory: {}", path.display()), path, e))?;
    }
    Ok(())
}
