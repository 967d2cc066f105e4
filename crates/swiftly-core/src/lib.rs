//! Core types and orchestration for swiftly.
//!
//! This crate provides shared types, error handling, and command execution
//! utilities used across all swiftly crates.

pub mod command;
pub mod env;
pub mod error;
pub mod version;

pub use command::{CommandOutput, CommandRunner, ProcessRunner};
pub use env::EnvVars;
pub use error::{Error, ErrorCode, Fix, Result};
pub use version::ToolchainVersion;

/// The name of the manager's own executable inside the shared bin directory.
pub const SELF_EXECUTABLE: &str = "swiftly";

/// Exit codes for the swiftly CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    GeneralError = 1,
    /// Usage error (bad arguments)
    UsageError = 2,
    /// Configuration error
    ConfigError = 3,
    /// Toolchain error (not installed, integrity violation, declined)
    ToolchainError = 4,
    /// Platform or prerequisite error
    PlatformError = 5,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ConfigError => ExitCode::ConfigError,
            ErrorCode::DetectionFailed | ErrorCode::PrerequisiteMissing => ExitCode::PlatformError,
            ErrorCode::IntegrityViolation | ErrorCode::ToolMissing | ErrorCode::CommandFailed => {
                ExitCode::ToolchainError
            }
            ErrorCode::Cancelled | ErrorCode::IoError | ErrorCode::NetworkError => {
                ExitCode::GeneralError
            }
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}
