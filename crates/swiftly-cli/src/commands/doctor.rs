//! Doctor command implementation.

use super::Context;
use swiftly_core::{CommandRunner, ExitCode, Fix, Result};
use swiftly_toolchain::{Arch, Manifest, PrerequisiteChecker, ReqwestClient};
use swiftly_ui::{Output, ScriptedPrompt, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Diagnostic {
    severity: Severity,
    message: String,
    fixes: Vec<Fix>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            fixes: vec![],
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    fn with_fixes(mut self, fixes: &[Fix]) -> Self {
        self.fixes.extend_from_slice(fixes);
        self
    }
}

#[derive(Debug, Default)]
struct DoctorReport {
    diagnostics: Vec<Diagnostic>,
}

impl DoctorReport {
    fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Errors are platform problems; warnings alone still pass.
    fn exit_code(&self) -> i32 {
        if self.has_errors() {
            ExitCode::PlatformError.into()
        } else {
            ExitCode::Success.into()
        }
    }
}

/// Run the doctor command.
///
/// Never prompts and never installs anything.
pub async fn run(ctx: &Context) -> Result<i32> {
    ctx.output.status("Running", "doctor checks");

    let mut report = DoctorReport::default();
    let runner = CommandRunner::new();
    let http = ReqwestClient::new(ctx.printer)?;
    let checker = PrerequisiteChecker::new(&runner, &http);

    match checker.check_system_prerequisites() {
        Ok(()) => report.add(Diagnostic::info("CA certificate bundle found")),
        Err(e) => report.add(Diagnostic::error(e.to_string()).with_fixes(e.fixes())),
    }

    match Arch::current() {
        Some(arch) => report.add(Diagnostic::info(format!("architecture: {:?}", arch))),
        None => report.add(Diagnostic::error(format!(
            "unsupported CPU architecture: {}",
            std::env::consts::ARCH
        ))),
    }

    let manifest = Manifest::load(&ctx.paths.home_dir)?;
    let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
    match ctx.resolve_platform_with(&manifest, false, &mut prompt) {
        Ok(platform) => {
            report.add(Diagnostic::info(format!("platform: {}", platform)));

            match checker.check_signing_tool(&platform).await {
                Ok(()) => report.add(Diagnostic::info("gpg available")),
                Err(e) => report.add(Diagnostic::warning(e.to_string()).with_fixes(e.fixes())),
            }

            match checker.package_remediation(&platform).await {
                Ok(None) => report.add(Diagnostic::info("system packages installed")),
                Ok(Some(command)) => report.add(
                    Diagnostic::warning("some system packages needed by Swift are missing")
                        .with_fixes(&[Fix::with_command("Install them", command)]),
                ),
                Err(e) => report.add(Diagnostic::warning(e.to_string())),
            }
        }
        Err(e) => report.add(Diagnostic::error(e.to_string()).with_fixes(e.fixes())),
    }

    match &manifest.in_use {
        Some(version) => report.add(Diagnostic::info(format!("in use: Swift {}", version))),
        None => report.add(Diagnostic::info("no toolchain in use")),
    }

    if !bin_dir_on_path(ctx) {
        report.add(
            Diagnostic::warning(format!(
                "{} is not on PATH",
                ctx.paths.bin_dir.display()
            ))
            .with_fixes(&[Fix::new(format!(
                "Add {} to PATH in your shell profile",
                ctx.paths.bin_dir.display()
            ))]),
        );
    }

    print_report(&report, &ctx.output);

    Ok(report.exit_code())
}

fn bin_dir_on_path(ctx: &Context) -> bool {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).any(|p| p == ctx.paths.bin_dir))
        .unwrap_or(false)
}

fn print_report(report: &DoctorReport, output: &Output) {
    output.header("Doctor Report");

    for diagnostic in &report.diagnostics {
        let prefix = match diagnostic.severity {
            Severity::Error => format!("{}", Style::error("✗")),
            Severity::Warning => format!("{}", Style::warning("⚠")),
            Severity::Info => format!("{}", Style::success("✓")),
        };
        eprintln!("  {} {}", prefix, diagnostic.message);

        for fix in &diagnostic.fixes {
            match &fix.command {
                Some(cmd) => eprintln!("    {} {}", Style::dim("fix:"), Style::command(cmd)),
                None => eprintln!("    {} {}", Style::dim("fix:"), fix.description),
            }
        }
    }

    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warning);
    eprintln!();
    if errors > 0 {
        eprintln!("{} {} error(s), {} warning(s)", Style::error("✗"), errors, warnings);
    } else if warnings > 0 {
        eprintln!("{} {} warning(s)", Style::warning("⚠"), warnings);
    } else {
        eprintln!("{} All checks passed", Style::success("✓"));
    }
}
