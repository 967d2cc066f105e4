//! List command implementation.

use super::Context;
use swiftly_core::Result;
use swiftly_toolchain::Manifest;
use swiftly_ui::Style;

/// Run the list command.
pub fn run(ctx: &Context) -> Result<i32> {
    let output = &ctx.output;
    let manifest = Manifest::load(&ctx.paths.home_dir)?;

    if manifest.installed.is_empty() {
        output.info("No toolchains installed");
        return Ok(0);
    }

    for installed in &manifest.installed {
        let marker = if manifest.in_use.as_ref() == Some(&installed.version) {
            format!(" {}", Style::success("(in use)"))
        } else {
            String::new()
        };
        output.result(&format!("{}{}", installed.version, marker));
        output.verbose(&format!(
            "  installed {}",
            installed.installed_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    Ok(0)
}
