//! Running external programs.
//!
//! swiftly shells out to `gpg`, `dpkg`, and `yum`. All of them go through
//! [`ProcessRunner`] so the prerequisite and install logic can be tested
//! against canned output.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{Error, Fix};

/// Captured result of a finished program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `-1` when the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Render a program and its arguments the way a user would type them.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` to completion and capture its output.
    ///
    /// A non-zero exit status is not an error; failing to spawn the program is.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, Error>;

    /// Like [`run`](Self::run), but a non-zero exit is a `CommandFailed` error.
    async fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput, Error> {
        let output = self.run(program, args).await?;
        if output.success() {
            return Ok(output);
        }
        Err(Error::CommandFailed {
            command: command_line(program, args),
            exit_code: Some(output.exit_code),
            stdout: output.stdout,
            stderr: output.stderr,
            fixes: vec![],
        })
    }
}

/// Runs programs with `tokio::process`.
///
/// Programs run with `LC_ALL=C` and no stdin so their output is parseable and
/// they never wait for input.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for CommandRunner {
    #[instrument(skip(self, args))]
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, Error> {
        debug!("Running {}", command_line(program, args));

        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::ToolMissing {
                    tool: program.to_string(),
                    source: Some(Box::new(e)),
                    fixes: vec![Fix::new(format!(
                        "Install {} with your system package manager",
                        program
                    ))],
                },
                _ => Error::Io {
                    message: format!("failed to execute {}", program),
                    path: None,
                    source: e,
                },
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "{} exited", program);

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
