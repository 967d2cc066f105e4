//! On-disk record of installed toolchains and the one in use.

use crate::platform::PlatformDefinition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swiftly_core::{Error, Result, ToolchainVersion};
use tracing::debug;

/// Manifest filename under the swiftly home directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// State shared between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version for future compatibility.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Platform chosen the first time detection ran.
    pub platform: Option<PlatformDefinition>,
    /// Toolchain whose executables are linked into the bin directory.
    pub in_use: Option<ToolchainVersion>,
    #[serde(default)]
    pub installed: Vec<InstalledToolchain>,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledToolchain {
    pub version: ToolchainVersion,
    pub installed_at: DateTime<Utc>,
}

impl InstalledToolchain {
    pub fn new(version: ToolchainVersion) -> Self {
        Self {
            version,
            installed_at: Utc::now(),
        }
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            schema_version: default_schema_version(),
            ..Default::default()
        }
    }

    pub fn path(home_dir: &Path) -> PathBuf {
        home_dir.join(MANIFEST_FILENAME)
    }

    /// Load the manifest from the swiftly home directory.
    ///
    /// Returns an empty manifest if the file doesn't exist.
    pub fn load(home_dir: &Path) -> Result<Self> {
        let manifest_path = Self::path(home_dir);

        if !manifest_path.exists() {
            debug!("No manifest at {}, using empty", manifest_path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(&manifest_path)
            .map_err(|e| Error::io("failed to read manifest", &manifest_path, e))?;

        serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse manifest: {}", e),
            path: Some(manifest_path),
            source: Some(Box::new(e)),
            fixes: vec![],
        })
    }

    /// Save the manifest, creating the home directory if needed.
    pub fn save(&self, home_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(home_dir)
            .map_err(|e| Error::io("failed to create swiftly home directory", home_dir, e))?;

        let manifest_path = Self::path(home_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize manifest: {}", e)))?;

        std::fs::write(&manifest_path, content)
            .map_err(|e| Error::io("failed to write manifest", &manifest_path, e))
    }

    /// Record an installed toolchain, replacing any entry for the same version.
    pub fn add(&mut self, version: ToolchainVersion) {
        self.installed.retain(|t| t.version != version);
        self.installed.push(InstalledToolchain::new(version));
        self.installed.sort_by(|a, b| a.version.cmp(&b.version));
    }

    /// Drop a toolchain. Clears `in_use` if it pointed at it.
    pub fn remove(&mut self, version: &ToolchainVersion) -> Option<InstalledToolchain> {
        let index = self.installed.iter().position(|t| &t.version == version)?;
        if self.in_use.as_ref() == Some(version) {
            self.in_use = None;
        }
        Some(self.installed.remove(index))
    }

    pub fn is_installed(&self, version: &ToolchainVersion) -> bool {
        self.installed.iter().any(|t| &t.version == version)
    }

    pub fn get(&self, version: &ToolchainVersion) -> Option<&InstalledToolchain> {
        self.installed.iter().find(|t| &t.version == version)
    }
}
