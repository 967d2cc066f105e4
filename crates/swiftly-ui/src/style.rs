//! Terminal colors.

use console::{StyledObject, style};
use std::fmt::Display;

/// Named styles so every command colors the same things the same way.
pub struct Style;

impl Style {
    pub fn error<D: Display>(text: D) -> StyledObject<D> {
        style(text).red().bold()
    }

    pub fn warning<D: Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    pub fn success<D: Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    pub fn info<D: Display>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    /// A command the user can copy and run.
    pub fn command<D: Display>(text: D) -> StyledObject<D> {
        style(text).cyan().bold()
    }

    pub fn dim<D: Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    pub fn bold<D: Display>(text: D) -> StyledObject<D> {
        style(text).bold()
    }

    /// `1_500_000` -> `"1.5 MB"`.
    pub fn megabytes(bytes: u64) -> String {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    }
}

/// Turn colored output off for both streams when `disabled` is set or the
/// environment asks for it. Otherwise `console` decides per terminal.
pub fn configure_colors(disabled: bool) {
    if disabled || swiftly_core::env::no_color() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}
