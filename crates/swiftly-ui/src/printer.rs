//! How much the CLI prints, chosen once from `-q`/`-v`.

use indicatif::ProgressDrawTarget;

/// Verbosity selected by the global flags.
///
/// Ordered from least to most output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Printer {
    /// `-qq`: only results and errors.
    Silent,
    /// `-q`: results, warnings, and errors.
    Quiet,
    #[default]
    Normal,
    /// `-v`: adds detail lines and tool stderr.
    Verbose,
}

impl Printer {
    /// `quiet` wins over `verbose`.
    pub fn from_flags(quiet: u8, verbose: bool) -> Self {
        match (quiet, verbose) {
            (0, false) => Self::Normal,
            (0, true) => Self::Verbose,
            (1, _) => Self::Quiet,
            _ => Self::Silent,
        }
    }

    /// Where spinners and progress bars draw.
    ///
    /// Only normal mode animates; verbose mode would interleave them with log
    /// lines.
    pub fn target(self) -> ProgressDrawTarget {
        if self == Self::Normal {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        }
    }

    pub fn shows_status(self) -> bool {
        self >= Self::Normal
    }

    pub fn shows_warnings(self) -> bool {
        self >= Self::Quiet
    }

    pub fn is_verbose(self) -> bool {
        self == Self::Verbose
    }
}
