//! Test doubles for process execution and downloads.

use crate::download::HttpClient;
use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use swiftly_core::command::command_line;
use swiftly_core::{CommandOutput, Error, ProcessRunner, Result};

pub fn output(exit_code: i32, stdout: &str) -> CommandOutput {
    CommandOutput {
        exit_code,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Answers commands from a table keyed by the full command line.
///
/// Unknown commands exit with status 1. Programs marked missing fail to
/// spawn.
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: HashMap<String, CommandOutput>,
    missing: Vec<String>,
    succeed_prefixes: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), output(exit_code, stdout));
        self
    }

    /// Succeed for any command line starting with `prefix`.
    pub fn succeed_prefix(mut self, prefix: &str) -> Self {
        self.succeed_prefixes.push(prefix.to_string());
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.split_whitespace().next() == Some(program))
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        self.calls.lock().unwrap().push(command.clone());

        if self.missing.iter().any(|p| p == program) {
            return Err(Error::ToolMissing {
                tool: program.to_string(),
                source: None,
                fixes: vec![],
            });
        }

        if let Some(response) = self.responses.get(&command) {
            return Ok(response.clone());
        }
        if self.succeed_prefixes.iter().any(|p| command.starts_with(p)) {
            return Ok(output(0, ""));
        }
        Ok(output(1, ""))
    }
}

/// Serves fixed bodies by URL and records every request.
#[derive(Debug, Default)]
pub struct FakeHttpClient {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.bodies.get(url) {
            Some(body) => std::fs::write(dest, body).map_err(|e| Error::io("write failed", dest, e)),
            None => Err(Error::Network {
                message: "HTTP 404 Not Found".to_string(),
                url: url.to_string(),
                source: None,
            }),
        }
    }
}

/// Write a `.tar.gz` with executable regular files.
pub fn write_archive(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::fast()));
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
