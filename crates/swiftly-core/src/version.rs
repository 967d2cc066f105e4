//! Toolchain version identity.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::Error;

static STABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("valid pattern"));
static RELEASE_SNAPSHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)-snapshot-(\d{4}-\d{2}-\d{2})$").expect("valid pattern")
});
static MAIN_SNAPSHOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^main-snapshot-(\d{4}-\d{2}-\d{2})$").expect("valid pattern"));

/// A toolchain that swiftly can install and switch to.
///
/// The [`name`](ToolchainVersion::name) is the directory key under the
/// toolchains root, so it must round-trip through [`FromStr`].
/// Ordering sorts stable releases numerically ahead of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolchainVersion {
    /// A tagged release such as `5.10.1`.
    Stable { major: u32, minor: u32, patch: u32 },
    /// A snapshot of a release branch, e.g. `5.10-snapshot-2024-02-15`.
    ReleaseSnapshot {
        major: u32,
        minor: u32,
        date: String,
    },
    /// A snapshot of the main branch, e.g. `main-snapshot-2024-02-15`.
    MainSnapshot { date: String },
}

impl ToolchainVersion {
    /// Create a stable release version.
    pub fn stable(major: u32, minor: u32, patch: u32) -> Self {
        Self::Stable {
            major,
            minor,
            patch,
        }
    }

    /// Directory name for this toolchain under the toolchains root.
    pub fn name(&self) -> String {
        match self {
            Self::Stable {
                major,
                minor,
                patch,
            } => format!("{}.{}.{}", major, minor, patch),
            Self::ReleaseSnapshot { major, minor, date } => {
                format!("{}.{}-snapshot-{}", major, minor, date)
            }
            Self::MainSnapshot { date } => format!("main-snapshot-{}", date),
        }
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ToolchainVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let number = |text: &str| {
            text.parse::<u32>()
                .map_err(|_| Error::config(format!("version component out of range: {}", text)))
        };

        if let Some(caps) = STABLE.captures(s) {
            let patch = match caps.get(3) {
                Some(p) => number(p.as_str())?,
                None => 0,
            };
            return Ok(Self::Stable {
                major: number(&caps[1])?,
                minor: number(&caps[2])?,
                patch,
            });
        }

        if let Some(caps) = RELEASE_SNAPSHOT.captures(s) {
            return Ok(Self::ReleaseSnapshot {
                major: number(&caps[1])?,
                minor: number(&caps[2])?,
                date: caps[3].to_string(),
            });
        }

        if let Some(caps) = MAIN_SNAPSHOT.captures(s) {
            return Ok(Self::MainSnapshot {
                date: caps[1].to_string(),
            });
        }

        Err(Error::Config {
            message: format!("invalid toolchain version: {}", s),
            path: None,
            source: None,
            fixes: vec![crate::Fix::new(
                "Use a release like 5.10.1, or a snapshot like main-snapshot-2024-02-15 or 5.10-snapshot-2024-02-15",
            )],
        })
    }
}

impl Serialize for ToolchainVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for ToolchainVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
