//! swiftly - Swift toolchain manager for Linux
//!
//! Installs Swift toolchains and switches between them.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod styles;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    swiftly_telemetry::init(cli.global.verbose);
    swiftly_ui::style::configure_colors(cli.global.no_color);

    let exit_code = commands::run(cli).await?;

    std::process::exit(exit_code);
}
