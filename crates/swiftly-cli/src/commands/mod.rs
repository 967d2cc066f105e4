//! Command implementations.

mod doctor;
mod install;
mod list;
mod uninstall;
mod use_toolchain;

use crate::cli::{Cli, Commands, GlobalArgs};
use anyhow::Result;
use swiftly_config::{GlobalConfig, SwiftlyPaths, load_global_config};
use swiftly_core::env::is_ci;
use swiftly_core::{Error, ExitCode};
use swiftly_telemetry::TimingGuard;
use swiftly_toolchain::{Manifest, PlatformDefinition, PlatformDetector, platform_from_hint};
use swiftly_ui::{Output, Printer, Prompt, ScriptedPrompt, StdinPrompt};
use tracing::debug;

/// State shared by every command.
pub struct Context {
    pub global: GlobalArgs,
    pub printer: Printer,
    pub output: Output,
    pub config: GlobalConfig,
    pub paths: SwiftlyPaths,
}

impl Context {
    fn load(global: GlobalArgs, printer: Printer, output: Output) -> swiftly_core::Result<Self> {
        let config = load_global_config(global.config_file.as_deref())?.unwrap_or_default();
        let paths = SwiftlyPaths::resolve(&config)?;
        Ok(Self {
            global,
            printer,
            output,
            config,
            paths,
        })
    }

    /// Prompt for confirmations. `--assume-yes` answers `y` to everything.
    pub fn prompt(&self) -> Box<dyn Prompt> {
        if self.global.assume_yes {
            Box::new(ScriptedPrompt::always("y"))
        } else {
            Box::new(StdinPrompt::new())
        }
    }

    /// Whether the platform selection menu may be shown.
    pub fn interactive(&self) -> bool {
        !self.global.non_interactive && !is_ci()
    }

    /// Platform for downloads: `--platform`, then the platform recorded at
    /// first detection, then detection using the config hint.
    pub fn resolve_platform(
        &self,
        manifest: &Manifest,
        prompt: &mut dyn Prompt,
    ) -> swiftly_core::Result<PlatformDefinition> {
        self.resolve_platform_with(manifest, self.interactive(), prompt)
    }

    fn resolve_platform_with(
        &self,
        manifest: &Manifest,
        interactive: bool,
        prompt: &mut dyn Prompt,
    ) -> swiftly_core::Result<PlatformDefinition> {
        if let Some(hint) = &self.global.platform {
            return platform_from_hint(hint);
        }
        if let Some(platform) = &manifest.platform {
            debug!("Using recorded platform {}", platform.name);
            return Ok(platform.clone());
        }
        PlatformDetector::default().detect(self.config.platform.as_deref(), interactive, prompt)
    }
}

/// Exit code for an error.
pub fn exit_code(error: &Error) -> i32 {
    ExitCode::from(error.code()).into()
}

/// Run the CLI command.
pub async fn run(cli: Cli) -> Result<i32> {
    let printer = Printer::from_flags(cli.global.quiet, cli.global.verbose);
    let output = Output::new(printer);

    let ctx = match Context::load(cli.global, printer, output) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.print_error(&e);
            return Ok(exit_code(&e));
        }
    };

    let _timing = TimingGuard::new(cli.command.name());
    debug!(command = cli.command.name(), "dispatching");

    let result = match cli.command {
        Commands::Install {
            target_version,
            use_after,
            no_verify,
        } => install::run(&ctx, &target_version, use_after, no_verify).await,
        Commands::Use { target_version } => use_toolchain::run(&ctx, target_version.as_deref()),
        Commands::Uninstall { target_version } => uninstall::run(&ctx, &target_version),
        Commands::List => list::run(&ctx),
        Commands::Doctor => doctor::run(&ctx).await,
    };

    output.flush();

    match result {
        Ok(code) => Ok(code),
        Err(e) => {
            output.print_error(&e);
            Ok(exit_code(&e))
        }
    }
}
