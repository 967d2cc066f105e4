//! Uninstall command implementation.

use super::Context;
use swiftly_core::{ExitCode, Result, ToolchainVersion};

/// Run the uninstall command.
pub fn run(ctx: &Context, version: &str) -> Result<i32> {
    let output = &ctx.output;
    let version: ToolchainVersion = version.parse()?;

    if swiftly_toolchain::uninstall(&ctx.paths, ctx.printer, &version)? {
        output.status("Uninstalled", &format!("Swift {}", version));
        Ok(0)
    } else {
        output.error(&format!("Swift {} is not installed", version));
        Ok(ExitCode::ToolchainError.into())
    }
}
