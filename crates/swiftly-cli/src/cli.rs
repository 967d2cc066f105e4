//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use swiftly_core::EnvVars;

use crate::styles::STYLES;

/// swiftly - Swift toolchain manager
#[derive(Parser, Debug)]
#[command(name = "swiftly")]
#[command(author, version, about = "Install and switch between Swift toolchains on Linux")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(styles = STYLES)]
#[command(after_help = "Use `swiftly help <command>` for more information about a command.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true, env = EnvVars::SWIFTLY_VERBOSE)]
    pub verbose: bool,

    /// Suppress output (use twice for complete silence)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = EnvVars::SWIFTLY_QUIET)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true, env = EnvVars::SWIFTLY_NO_COLOR)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = EnvVars::SWIFTLY_CONFIG_FILE)]
    pub config_file: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub assume_yes: bool,

    /// Skip OS detection and use this platform
    /// (ubuntu22.04, ubuntu20.04, ubuntu18.04, amazonlinux2, rhel9)
    #[arg(long, global = true, env = EnvVars::SWIFTLY_PLATFORM)]
    pub platform: Option<String>,

    /// Never show the platform selection menu
    #[arg(long, global = true)]
    pub non_interactive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and install a toolchain
    Install {
        /// Version to install (5.10.1, 5.10, 5.10-snapshot-2024-02-15, main-snapshot-2024-02-15)
        #[arg(value_name = "VERSION")]
        target_version: String,

        /// Use the toolchain after installing even if another one is in use
        #[arg(long = "use")]
        use_after: bool,

        /// Skip gpg signature verification
        #[arg(long)]
        no_verify: bool,
    },

    /// Switch to an installed toolchain, or show the one in use
    Use {
        /// Version to use
        #[arg(value_name = "VERSION")]
        target_version: Option<String>,
    },

    /// Remove an installed toolchain
    Uninstall {
        /// Version to remove
        #[arg(value_name = "VERSION")]
        target_version: String,
    },

    /// List installed toolchains
    List,

    /// Check system prerequisites and platform detection
    Doctor,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install { .. } => "install",
            Self::Use { .. } => "use",
            Self::Uninstall { .. } => "uninstall",
            Self::List => "list",
            Self::Doctor => "doctor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_install_flags() {
        let cli = Cli::try_parse_from([
            "swiftly", "install", "5.10.1", "--use", "--no-verify", "-y", "--platform", "rhel9",
        ])
        .unwrap();
        assert!(cli.global.assume_yes);
        assert_eq!(cli.global.platform.as_deref(), Some("rhel9"));
        match cli.command {
            Commands::Install {
                target_version,
                use_after,
                no_verify,
            } => {
                assert_eq!(target_version, "5.10.1");
                assert!(use_after);
                assert!(no_verify);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_version_positional_and_flag_coexist() {
        let cli = Cli::try_parse_from(["swiftly", "use", "5.10.1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Use { target_version: Some(ref v) } if v == "5.10.1"
        ));

        let cli = Cli::try_parse_from(["swiftly", "uninstall", "main-snapshot-2024-02-15"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Uninstall { ref target_version } if target_version == "main-snapshot-2024-02-15"
        ));

        let err = Cli::try_parse_from(["swiftly", "install", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_quiet_counts() {
        let cli = Cli::try_parse_from(["swiftly", "-qq", "list"]).unwrap();
        assert_eq!(cli.global.quiet, 2);
    }
}
