//! Host platform detection.
//!
//! Detection maps the host to one of the [`PlatformDefinition`]s that
//! toolchains are published for. Order of precedence:
//! 1. An explicit platform hint
//! 2. The first `os-release` file found
//! 3. A manual selection menu (interactive mode only)

use crate::os_release::{OS_RELEASE_PATHS, OsRelease, find_os_release};
use crate::platform::{PLATFORM_HINTS, PlatformDefinition};
use std::path::PathBuf;
use swiftly_core::{Error, Fix, Result};
use swiftly_ui::Prompt;
use tracing::{debug, info, instrument};

/// Distribution family markers, matched in order against `ID` + `ID_LIKE`.
///
/// `ID_LIKE` can name several families; the first marker found wins.
const FAMILY_MARKERS: [&str; 3] = ["amzn", "ubuntu", "rhel"];

/// Message used when no descriptor can be found or understood.
pub const UNDETECTABLE_MESSAGE: &str = "Unable to detect the type of Linux OS and the release";

/// Classifies the host into a supported platform.
#[derive(Debug, Clone)]
pub struct PlatformDetector {
    candidates: Vec<PathBuf>,
}

impl Default for PlatformDetector {
    fn default() -> Self {
        Self::with_candidates(OS_RELEASE_PATHS.iter().map(PathBuf::from))
    }
}

impl PlatformDetector {
    /// Create a detector that checks the given descriptor paths in order.
    pub fn with_candidates<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Detect the platform.
    ///
    /// An unrecognized `hint` fails immediately. Any other detection failure
    /// falls back to the manual menu when `interactive` is set; choosing
    /// Cancel or an invalid entry there yields [`Error::Cancelled`].
    #[instrument(skip(self, prompt))]
    pub fn detect(
        &self,
        hint: Option<&str>,
        interactive: bool,
        prompt: &mut dyn Prompt,
    ) -> Result<PlatformDefinition> {
        if let Some(hint) = hint {
            return platform_from_hint(hint);
        }

        match self.detect_from_os_release() {
            Ok(platform) => {
                info!("Detected platform {}", platform.name_pretty);
                Ok(platform)
            }
            Err(err @ Error::Detection { .. }) if interactive => {
                debug!("Falling back to manual platform selection: {}", err);
                select_platform_manually(&err.to_string(), prompt)
            }
            Err(err) => Err(err),
        }
    }

    fn detect_from_os_release(&self) -> Result<PlatformDefinition> {
        let Some(path) = find_os_release(&self.candidates) else {
            return Err(Error::detection(UNDETECTABLE_MESSAGE));
        };

        debug!("Reading OS release info from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| Error::Detection {
            message: format!("{}: {}", UNDETECTABLE_MESSAGE, e),
            path: Some(path.clone()),
            fixes: vec![],
        })?;

        classify(&OsRelease::parse(&content)).map_err(|err| match err {
            Error::Detection { message, fixes, .. } => Error::Detection {
                message,
                path: Some(path.clone()),
                fixes,
            },
            other => other,
        })
    }
}

/// Map a platform hint to its definition.
pub fn platform_from_hint(hint: &str) -> Result<PlatformDefinition> {
    PlatformDefinition::from_hint(hint).ok_or_else(|| Error::Detection {
        message: format!("Unrecognized platform {}", hint),
        path: None,
        fixes: vec![Fix::new(format!(
            "Use one of: {}",
            PLATFORM_HINTS.join(", ")
        ))],
    })
}

/// Classify parsed `os-release` fields into a supported platform.
pub fn classify(release: &OsRelease) -> Result<PlatformDefinition> {
    let Some(family) = release.family_text() else {
        return Err(Error::detection(UNDETECTABLE_MESSAGE));
    };

    let version_id = release.version_id.as_deref().unwrap_or_default();

    match FAMILY_MARKERS.iter().find(|marker| family.contains(*marker)) {
        Some(&"amzn") => {
            if version_id == "2" {
                Ok(PlatformDefinition::amazonlinux2())
            } else {
                Err(Error::detection(format!(
                    "Unsupported version of Amazon Linux: {}",
                    version_id
                )))
            }
        }
        Some(&"ubuntu") => match release.ubuntu_codename.as_deref() {
            Some("jammy") => Ok(PlatformDefinition::ubuntu2204()),
            Some("focal") => Ok(PlatformDefinition::ubuntu2004()),
            Some("bionic") => Ok(PlatformDefinition::ubuntu1804()),
            other => Err(Error::detection(format!(
                "Unsupported version of Ubuntu Linux: {}",
                other.unwrap_or("unknown")
            ))),
        },
        Some(&"rhel") => {
            if version_id.starts_with('9') {
                Ok(PlatformDefinition::rhel9())
            } else {
                Err(Error::detection(format!(
                    "Unsupported version of RHEL: {}",
                    version_id
                )))
            }
        }
        _ => Err(Error::detection(format!(
            "Unsupported Linux platform: {}",
            release
                .pretty_name
                .as_deref()
                .or(release.id.as_deref())
                .unwrap_or("unknown")
        ))),
    }
}

/// Render the manual selection menu.
fn selection_menu(reason: &str) -> String {
    let mut menu = format!(
        "{}\n\nPlease select the platform to use for toolchain downloads:\n\n0) Cancel\n",
        reason
    );
    for (index, platform) in PlatformDefinition::manual_choices().iter().enumerate() {
        menu.push_str(&format!("{}) {}\n", index + 1, platform.name_pretty));
    }
    menu.push_str(&format!(
        "\nPick one of the available selections [0-{}] : ",
        PlatformDefinition::manual_choices().len()
    ));
    menu
}

fn select_platform_manually(reason: &str, prompt: &mut dyn Prompt) -> Result<PlatformDefinition> {
    let answer = prompt.ask(&selection_menu(reason))?;
    let choice = answer
        .as_deref()
        .map(str::trim)
        .and_then(|a| a.parse::<usize>().ok());

    match choice {
        Some(n) if n >= 1 => PlatformDefinition::manual_choices()
            .into_iter()
            .nth(n - 1)
            .ok_or_else(cancelled),
        _ => Err(cancelled()),
    }
}

fn cancelled() -> Error {
    Error::Cancelled {
        message: "Platform selection cancelled".to_string(),
    }
}
