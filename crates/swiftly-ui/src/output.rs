//! User-facing messages.
//!
//! Everything goes to stderr except [`Output::result`], which is the
//! machine-readable answer of a command (`swiftly use`, `swiftly list`).

use crate::printer::Printer;
use crate::style::Style;
use std::io::{self, Write};
use swiftly_core::error::{Error, Fix};

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    printer: Printer,
}

impl Output {
    pub fn new(printer: Printer) -> Self {
        Self { printer }
    }

    /// Right-aligned green action word followed by a message.
    pub fn status(&self, action: &str, message: &str) {
        if self.printer.shows_status() {
            eprintln!("{:>12} {}", Style::bold(Style::success(action)), message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.printer.shows_status() {
            eprintln!("{}", message);
        }
    }

    /// Printed on stdout at every verbosity.
    pub fn result(&self, message: &str) {
        println!("{}", message);
    }

    pub fn warn(&self, message: &str) {
        if self.printer.shows_warnings() {
            eprintln!("{}: {}", Style::warning("warning"), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}: {}", Style::error("error"), message);
    }

    pub fn verbose(&self, message: &str) {
        if self.printer.is_verbose() {
            eprintln!("{}", Style::dim(message));
        }
    }

    /// Print an error with its location and suggested fixes.
    ///
    /// Captured stderr of a failed command is only shown with `-v`.
    pub fn print_error(&self, error: &Error) {
        self.error(&error.to_string());

        match error {
            Error::Config { path: Some(p), .. }
            | Error::Detection { path: Some(p), .. }
            | Error::Io { path: Some(p), .. } => {
                eprintln!("  {} {}", Style::dim("-->"), p.display());
            }
            Error::Network { url, .. } if !url.is_empty() => {
                eprintln!("  {} {}", Style::dim("url:"), url);
            }
            Error::CommandFailed { stderr, .. } if self.printer.is_verbose() => {
                for line in stderr.lines() {
                    eprintln!("  {} {}", Style::dim("|"), line);
                }
            }
            _ => {}
        }

        if !error.fixes().is_empty() {
            eprintln!();
            for fix in error.fixes() {
                self.print_fix(fix);
            }
        }
    }

    pub fn print_fix(&self, fix: &Fix) {
        match &fix.command {
            Some(cmd) => {
                eprintln!("{}: {}", Style::info("fix"), fix.description);
                eprintln!("     {}", Style::command(cmd));
            }
            None => eprintln!("{}: {}", Style::info("fix"), fix.description),
        }
    }

    /// Blank line and a bold title.
    pub fn header(&self, title: &str) {
        if self.printer.shows_status() {
            eprintln!();
            eprintln!("{}", Style::bold(title));
        }
    }

    pub fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}
