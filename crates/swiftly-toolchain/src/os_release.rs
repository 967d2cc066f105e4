//! Parsing of the `os-release` descriptor.

use std::path::{Path, PathBuf};

/// Candidate descriptor locations, checked in order.
pub const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Fields of an `os-release` file that platform detection looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    pub id: Option<String>,
    pub id_like: Option<String>,
    pub version_id: Option<String>,
    pub ubuntu_codename: Option<String>,
    pub pretty_name: Option<String>,
}

impl OsRelease {
    /// Parse `KEY=VALUE` lines. Surrounding double quotes are stripped; no
    /// other escaping is interpreted. Unknown keys and malformed lines are
    /// ignored.
    pub fn parse(content: &str) -> Self {
        let mut release = Self::default();

        for line in content.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = unquote(value.trim()).to_string();

            match key.trim() {
                "ID" => release.id = Some(value),
                "ID_LIKE" => release.id_like = Some(value),
                "VERSION_ID" => release.version_id = Some(value),
                "UBUNTU_CODENAME" => release.ubuntu_codename = Some(value),
                "PRETTY_NAME" => release.pretty_name = Some(value),
                _ => {}
            }
        }

        release
    }

    /// `ID` followed by `ID_LIKE`, or `None` when both are absent.
    pub fn family_text(&self) -> Option<String> {
        match (&self.id, &self.id_like) {
            (None, None) => None,
            (id, id_like) => Some(format!(
                "{}{}",
                id.as_deref().unwrap_or_default(),
                id_like.as_deref().unwrap_or_default()
            )),
        }
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Return the first candidate path that exists.
pub fn find_os_release<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.exists())
        .map(Path::to_path_buf)
}
