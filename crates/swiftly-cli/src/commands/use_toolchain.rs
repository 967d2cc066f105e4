//! Use command implementation.

use super::Context;
use swiftly_core::{ExitCode, Fix, Result, ToolchainVersion};
use swiftly_toolchain::{Activator, Manifest};

/// Run the use command.
///
/// Without a version, prints the toolchain in use.
pub fn run(ctx: &Context, version: Option<&str>) -> Result<i32> {
    let output = &ctx.output;
    let home = &ctx.paths.home_dir;
    let mut manifest = Manifest::load(home)?;

    let Some(version) = version else {
        match &manifest.in_use {
            Some(current) => output.result(&current.name()),
            None => output.info("No toolchain is in use"),
        }
        return Ok(0);
    };

    let target: ToolchainVersion = version.parse()?;
    let activator = Activator::from_paths(&ctx.paths).with_output(*output);

    if !activator.toolchain_bin_dir(&target).is_dir() {
        output.error(&format!("Swift {} is not installed", target));
        output.print_fix(&Fix::with_command(
            "Install it first",
            format!("swiftly install {}", target),
        ));
        return Ok(ExitCode::ToolchainError.into());
    }

    if manifest.in_use.as_ref() == Some(&target) {
        output.info(&format!("Swift {} is already in use", target));
        return Ok(0);
    }

    let current = manifest.in_use.clone();
    let mut prompt = ctx.prompt();
    let used = activator.use_toolchain(&target, current.as_ref(), prompt.as_mut())?;

    if used {
        manifest.in_use = Some(target.clone());
        manifest.save(home)?;
        output.status("Using", &format!("Swift {}", target));
        return Ok(0);
    }

    // The previous toolchain was unlinked before the user declined.
    if let Some(previous) = current {
        manifest.in_use = None;
        manifest.save(home)?;
        output.warn(&format!("Swift {} is no longer in use", previous));
    }
    Ok(ExitCode::GeneralError.into())
}
