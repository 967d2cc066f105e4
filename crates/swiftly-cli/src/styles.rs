//! CLI styling for help output.

use clap::builder::{Styles, styling::AnsiColor};

/// Help styles for the swiftly CLI.
///
/// Uses:
/// - Green for headers and usage
/// - Cyan for literals (commands, flags)
/// - Cyan for placeholders
pub const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().bold())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::Cyan.on_default().bold())
    .placeholder(AnsiColor::Cyan.on_default());
