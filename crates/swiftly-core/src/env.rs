//! Environment variables swiftly reads.

/// Names of every environment variable swiftly looks at.
pub struct EnvVars;

impl EnvVars {
    pub const SWIFTLY_CONFIG_FILE: &'static str = "SWIFTLY_CONFIG_FILE";
    pub const SWIFTLY_VERBOSE: &'static str = "SWIFTLY_VERBOSE";
    pub const SWIFTLY_QUIET: &'static str = "SWIFTLY_QUIET";
    pub const SWIFTLY_NO_COLOR: &'static str = "SWIFTLY_NO_COLOR";

    /// Emit logs as JSON lines.
    pub const SWIFTLY_LOG_JSON: &'static str = "SWIFTLY_LOG_JSON";

    /// Root of swiftly's state: the manifest and `toolchains/`.
    pub const SWIFTLY_HOME_DIR: &'static str = "SWIFTLY_HOME_DIR";

    /// Directory the toolchain in use is linked into. Meant to be on `PATH`.
    pub const SWIFTLY_BIN_DIR: &'static str = "SWIFTLY_BIN_DIR";

    /// Platform hint that bypasses os-release detection.
    pub const SWIFTLY_PLATFORM: &'static str = "SWIFTLY_PLATFORM";

    pub const NO_COLOR: &'static str = "NO_COLOR";
    pub const CLICOLOR: &'static str = "CLICOLOR";
    pub const CI: &'static str = "CI";
}

/// Running under a CI service. Interactive menus are skipped.
pub fn is_ci() -> bool {
    std::env::var_os(EnvVars::CI).is_some()
}

/// Whether the environment asks for plain output.
pub fn no_color() -> bool {
    std::env::var_os(EnvVars::NO_COLOR).is_some()
        || std::env::var_os(EnvVars::SWIFTLY_NO_COLOR).is_some()
        || std::env::var(EnvVars::CLICOLOR).is_ok_and(|v| v == "0")
}
