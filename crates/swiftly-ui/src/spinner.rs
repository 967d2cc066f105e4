//! Spinners and download progress bars.
//!
//! Both draw only when the [`Printer`] is in normal mode and are invisible
//! otherwise, so callers never need to check verbosity themselves.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::printer::Printer;
use crate::style::Style;

const TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn template(pattern: &str) -> ProgressStyle {
    ProgressStyle::with_template(pattern).expect("valid template")
}

fn settle(bar: &ProgressBar, mark: impl std::fmt::Display, message: String) {
    bar.set_style(template("{msg}"));
    bar.finish_with_message(format!("{} {}", mark, message));
}

/// Indeterminate progress for a single step.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: impl Into<String>, printer: Printer) -> Self {
        let bar = ProgressBar::with_draw_target(None, printer.target());
        bar.set_style(template("{spinner:.cyan} {msg}").tick_chars(TICKS));
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Replace the spinner with a green check and `message`.
    pub fn succeed(self, message: impl Into<String>) {
        settle(&self.bar, Style::success("✓"), message.into());
    }

    /// Replace the spinner with a red cross and `message`.
    pub fn fail(self, message: impl Into<String>) {
        settle(&self.bar, Style::error("✗"), message.into());
    }

    /// Remove the spinner line entirely.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}

/// Byte progress for a download of known size.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    pub fn new(total: u64, message: impl Into<String>, printer: Printer) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total), printer.target());
        bar.set_style(
            template("{msg} [{bar:40.cyan/dim}] {bytes}/{total_bytes} ({eta})")
                .progress_chars("━━─"),
        );
        bar.set_message(message.into());
        Self { bar }
    }

    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    pub fn finish(self, message: impl Into<String>) {
        settle(&self.bar, Style::success("✓"), message.into());
    }
}
