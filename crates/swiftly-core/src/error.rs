//! Error types for swiftly.

use std::path::PathBuf;

/// Result type alias using swiftly Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes for categorizing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The host platform could not be classified
    DetectionFailed,
    /// An OS-level prerequisite is missing
    PrerequisiteMissing,
    /// The shared bin directory holds something swiftly did not create
    IntegrityViolation,
    /// The user cancelled an interactive choice
    Cancelled,
    /// Invalid configuration or arguments
    ConfigError,
    /// External tool not found
    ToolMissing,
    /// Command execution failed
    CommandFailed,
    /// Download failed
    NetworkError,
    /// I/O error
    IoError,
}

/// A fix suggestion for an error.
#[derive(Debug, Clone)]
pub struct Fix {
    /// Description of what this fix does
    pub description: String,
    /// Command to run, if applicable
    pub command: Option<String>,
}

impl Fix {
    /// Create a fix with just a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    /// Create a fix with a command.
    pub fn with_command(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: Some(command.into()),
        }
    }
}

/// Structured error type for swiftly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{message}")]
    Detection {
        message: String,
        path: Option<PathBuf>,
        fixes: Vec<Fix>,
    },

    #[error("{message}")]
    Prerequisite { message: String, fixes: Vec<Fix> },

    #[error("{message}: {}", .path.display())]
    Integrity { message: String, path: PathBuf },

    #[error("{message}")]
    Cancelled { message: String },

    #[error("configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        fixes: Vec<Fix>,
    },

    #[error("{tool} not found")]
    ToolMissing {
        tool: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        fixes: Vec<Fix>,
    },

    #[error("command failed: {command}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        fixes: Vec<Fix>,
    },

    #[error("download failed: {message}")]
    Network {
        message: String,
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Detection { .. } => ErrorCode::DetectionFailed,
            Error::Prerequisite { .. } => ErrorCode::PrerequisiteMissing,
            Error::Integrity { .. } => ErrorCode::IntegrityViolation,
            Error::Cancelled { .. } => ErrorCode::Cancelled,
            Error::Config { .. } => ErrorCode::ConfigError,
            Error::ToolMissing { .. } => ErrorCode::ToolMissing,
            Error::CommandFailed { .. } => ErrorCode::CommandFailed,
            Error::Network { .. } => ErrorCode::NetworkError,
            Error::Io { .. } | Error::Other(_) => ErrorCode::IoError,
        }
    }

    /// Get suggested fixes for this error.
    pub fn fixes(&self) -> &[Fix] {
        match self {
            Error::Detection { fixes, .. } => fixes,
            Error::Prerequisite { fixes, .. } => fixes,
            Error::Config { fixes, .. } => fixes,
            Error::ToolMissing { fixes, .. } => fixes,
            Error::CommandFailed { fixes, .. } => fixes,
            Error::Integrity { .. }
            | Error::Cancelled { .. }
            | Error::Network { .. }
            | Error::Io { .. }
            | Error::Other(_) => &[],
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
            source: None,
            fixes: vec![],
        }
    }

    /// Create a detection error.
    pub fn detection(message: impl Into<String>) -> Self {
        Error::Detection {
            message: message.into(),
            path: None,
            fixes: vec![],
        }
    }

    /// Create a prerequisite error with a single remediation.
    pub fn prerequisite(message: impl Into<String>, fix: Fix) -> Self {
        Error::Prerequisite {
            message: message.into(),
            fixes: vec![fix],
        }
    }

    /// Create an integrity error for an entry in the shared bin directory.
    pub fn integrity(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::Integrity {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            path: Some(path.into()),
            source,
        }
    }

    /// Whether this error is the user backing out of an interactive choice.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }
}
