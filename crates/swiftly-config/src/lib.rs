//! Configuration and filesystem layout for swiftly.
//!
//! This crate handles:
//! - Parsing the global `config.toml`
//! - Resolving the swiftly home, toolchains, and shared bin directories

pub mod global;
pub mod paths;

pub use global::{
    GlobalConfig, GlobalConfigError, InstallConfig, PathsConfig, global_config_path,
    load_global_config,
};
pub use paths::SwiftlyPaths;

/// The global configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Directory under the swiftly home that holds installed toolchains.
pub const TOOLCHAINS_DIR_NAME: &str = "toolchains";
