//! Install command implementation.

use super::Context;
use swiftly_core::{CommandRunner, Error, Fix, Result, ToolchainVersion};
use swiftly_toolchain::{
    Arch, InstallOptions, InstallOutcome, Installer, Manifest, PrerequisiteChecker, ReqwestClient,
};

/// Run the install command.
pub async fn run(ctx: &Context, version: &str, use_after: bool, no_verify: bool) -> Result<i32> {
    let output = &ctx.output;
    let version: ToolchainVersion = version.parse()?;
    let manifest = Manifest::load(&ctx.paths.home_dir)?;
    let mut prompt = ctx.prompt();

    let platform = ctx.resolve_platform(&manifest, prompt.as_mut())?;
    let arch = Arch::current().ok_or_else(|| {
        Error::detection(format!(
            "Unsupported CPU architecture: {}",
            std::env::consts::ARCH
        ))
    })?;

    let runner = CommandRunner::new();
    let http = ReqwestClient::new(ctx.printer)?;
    let mut checker = PrerequisiteChecker::new(&runner, &http);
    checker.check_system_prerequisites()?;

    let verify_signature = ctx.config.install.verify_signatures && !no_verify;

    output.status("Checking", &format!("prerequisites for {}", platform));
    if let Some(command) = checker
        .check_install_prerequisites(&platform, &version, verify_signature)
        .await?
    {
        output.warn("some system packages needed by Swift are not installed");
        output.print_fix(&Fix::with_command("Install the missing packages", command));
    }

    output.status("Installing", &format!("Swift {}", version));
    let installer = Installer::new(ctx.paths.clone(), &runner, &http, ctx.printer);
    let options = InstallOptions {
        version: version.clone(),
        platform,
        arch,
        verify_signature,
        use_after,
    };

    match installer.install(&options, prompt.as_mut()).await? {
        InstallOutcome::AlreadyInstalled => {
            output.info(&format!("Swift {} is already installed", version));
        }
        InstallOutcome::Installed { activated } => {
            output.status("Installed", &format!("Swift {}", version));
            if activated {
                output.status("Using", &format!("Swift {}", version));
            }
        }
    }

    Ok(0)
}
