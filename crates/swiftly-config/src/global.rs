//! Global configuration.
//!
//! Global config is stored at `~/.config/swiftly/config.toml` (or the path in
//! `SWIFTLY_CONFIG_FILE`) and provides defaults that command-line flags and
//! environment variables can override.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use swiftly_core::EnvVars;
use thiserror::Error;
use tracing::debug;

use crate::CONFIG_FILENAME;

/// Why the config file could not be used.
#[derive(Debug, Error)]
pub enum GlobalConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl GlobalConfigError {
    /// The config file that could not be used.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

impl From<GlobalConfigError> for swiftly_core::Error {
    fn from(err: GlobalConfigError) -> Self {
        swiftly_core::Error::Config {
            message: err.to_string(),
            path: Some(err.path().to_path_buf()),
            fixes: vec![swiftly_core::Fix::new(
                "Fix the file, or point --config-file at another one",
            )],
            source: Some(Box::new(err)),
        }
    }
}

/// Directory overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Where swiftly keeps its state and installed toolchains.
    pub home_dir: Option<PathBuf>,
    /// Shared directory of symlinks to the toolchain in use.
    pub bin_dir: Option<PathBuf>,
}

/// Installation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstallConfig {
    /// Verify toolchain signatures with gpg before extracting.
    #[serde(default = "default_verify_signatures")]
    pub verify_signatures: bool,
}

fn default_verify_signatures() -> bool {
    true
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            verify_signatures: default_verify_signatures(),
        }
    }
}

/// Global configuration.
///
/// # Example
///
/// ```toml
/// # ~/.config/swiftly/config.toml
/// platform = "ubuntu22.04"
///
/// [paths]
/// home_dir = "/opt/swiftly"
/// bin_dir = "/opt/swiftly/bin"
///
/// [install]
/// verify_signatures = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GlobalConfig {
    /// Platform hint that skips OS detection.
    pub platform: Option<String>,

    /// Directory overrides
    #[serde(default)]
    pub paths: PathsConfig,

    /// Installation settings
    #[serde(default)]
    pub install: InstallConfig,
}

impl GlobalConfig {
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: &Path) -> Result<Self, GlobalConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| GlobalConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| GlobalConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the global configuration.
///
/// `explicit` (from `--config-file`) wins over `SWIFTLY_CONFIG_FILE`, which
/// wins over the platform default location. A missing file is `Ok(None)`.
pub fn load_global_config(explicit: Option<&Path>) -> Result<Option<GlobalConfig>, GlobalConfigError> {
    let Some(config_file) = explicit.map(Path::to_path_buf).or_else(global_config_path) else {
        debug!("No config location available");
        return Ok(None);
    };

    if !config_file.is_file() {
        debug!("No config at {}", config_file.display());
        return Ok(None);
    }

    debug!("Loading config from {}", config_file.display());
    GlobalConfig::from_file(&config_file).map(Some)
}

/// Default config location, honoring `SWIFTLY_CONFIG_FILE`.
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(EnvVars::SWIFTLY_CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("org", "swift", "swiftly").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty() {
        let config = GlobalConfig::parse("").unwrap();
        assert!(config.platform.is_none());
        assert!(config.paths.home_dir.is_none());
        assert!(config.install.verify_signatures);
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
platform = "rhel9"

[paths]
home_dir = "/opt/swiftly"
bin_dir = "/opt/swiftly/bin"

[install]
verify_signatures = false
"#;
        let config = GlobalConfig::parse(toml).unwrap();
        assert_eq!(config.platform.as_deref(), Some("rhel9"));
        assert_eq!(config.paths.home_dir, Some(PathBuf::from("/opt/swiftly")));
        assert_eq!(config.paths.bin_dir, Some(PathBuf::from("/opt/swiftly/bin")));
        assert!(!config.install.verify_signatures);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(GlobalConfig::parse("platform = 3").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_file = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_file, "platform = \"ubuntu20.04\"\n").unwrap();

        let loaded = load_global_config(Some(&config_file)).unwrap().unwrap();
        assert_eq!(
            loaded,
            GlobalConfig {
                platform: Some("ubuntu20.04".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let config_file = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_file, "[paths\n").unwrap();

        let err = load_global_config(Some(&config_file)).unwrap_err();
        assert_eq!(err.path(), config_file.as_path());

        let err: swiftly_core::Error = err.into();
        assert!(matches!(err, swiftly_core::Error::Config { path: Some(_), .. }));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join(CONFIG_FILENAME);
        assert!(load_global_config(Some(&missing)).unwrap().is_none());
    }
}
