//! Toolchain activation.
//!
//! The toolchain in use is exposed through symlinks in the shared bin
//! directory, one per executable in `<toolchains>/<name>/usr/bin`. The
//! manager's own executable lives in the same directory and is never
//! touched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use swiftly_config::SwiftlyPaths;
use swiftly_config::paths::ensure_dir;
use swiftly_core::{Error, Result, SELF_EXECUTABLE, ToolchainVersion};
use swiftly_ui::{Output, Prompt, confirm};
use tracing::{debug, info, instrument};

/// Manages the symlinks for the toolchain in use.
#[derive(Debug, Clone)]
pub struct Activator {
    toolchains_dir: PathBuf,
    bin_dir: PathBuf,
    output: Output,
}

impl Activator {
    pub fn new(toolchains_dir: impl Into<PathBuf>, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchains_dir: toolchains_dir.into(),
            bin_dir: bin_dir.into(),
            output: Output::default(),
        }
    }

    pub fn from_paths(paths: &SwiftlyPaths) -> Self {
        Self::new(paths.toolchains_dir(), &paths.bin_dir)
    }

    /// Use `output` for conflict listings and the abort notice.
    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Directory holding a toolchain's executables.
    pub fn toolchain_bin_dir(&self, version: &ToolchainVersion) -> PathBuf {
        self.toolchains_dir
            .join(version.name())
            .join("usr")
            .join("bin")
    }

    /// Make `target` the toolchain in use.
    ///
    /// Returns `false` without touching anything when `target` is not
    /// installed, and `false` when the user declines to overwrite executables
    /// swiftly did not create. Links created before a mid-way I/O failure are
    /// left in place.
    #[instrument(skip(self, target, current, prompt), fields(target = %target))]
    pub fn use_toolchain(
        &self,
        target: &ToolchainVersion,
        current: Option<&ToolchainVersion>,
        prompt: &mut dyn Prompt,
    ) -> Result<bool> {
        let source_dir = self.toolchain_bin_dir(target);
        if !source_dir.is_dir() {
            debug!("{} is not installed", source_dir.display());
            return Ok(false);
        }

        if let Some(current) = current {
            self.unuse(current)?;
        }

        let names: Vec<String> = executable_names(&source_dir)?
            .into_iter()
            .filter(|name| name != SELF_EXECUTABLE)
            .collect();

        let conflicts = self.conflicts(&names)?;
        if !conflicts.is_empty() {
            let mut message = format!(
                "The following existing executables in {} are not managed by swiftly and will be overwritten:\n",
                self.bin_dir.display()
            );
            for name in &conflicts {
                message.push_str(&format!("  {}\n", name));
            }
            message.push_str("Proceed?");

            if !confirm(prompt, &message)? {
                self.output.info("Aborting use");
                return Ok(false);
            }
        }

        ensure_dir(&self.bin_dir)?;

        for name in &names {
            let source = source_dir.join(name);
            let link = self.bin_dir.join(name);

            match fs::remove_file(&link) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(format!("failed to remove {}", name), &link, e)),
            }

            std::os::unix::fs::symlink(&source, &link).map_err(|e| {
                Error::io(format!("failed to create symlink for {}", name), &link, e)
            })?;

            debug!("Created symlink: {} -> {}", link.display(), source.display());
        }

        info!("Linked {} executables into {}", names.len(), self.bin_dir.display());
        Ok(true)
    }

    /// Remove the links that expose `current`.
    ///
    /// Every entry is validated before any is removed. An entry that is
    /// missing, is not a symlink, or links outside `current`'s bin directory
    /// is an integrity error and nothing is deleted. `current` must still be
    /// installed.
    #[instrument(skip(self, current), fields(current = %current))]
    pub fn unuse(&self, current: &ToolchainVersion) -> Result<()> {
        let source_dir = self.toolchain_bin_dir(current);

        let mut owned = Vec::new();
        for name in executable_names(&source_dir)? {
            if name == SELF_EXECUTABLE {
                continue;
            }

            let link = self.bin_dir.join(&name);
            let is_symlink = match fs::symlink_metadata(&link) {
                Ok(metadata) => metadata.file_type().is_symlink(),
                Err(e) if e.kind() == ErrorKind::NotFound => false,
                Err(e) => return Err(Error::io("failed to inspect executable", &link, e)),
            };

            if !is_symlink {
                return Err(Error::integrity(
                    "found executable not managed by swiftly",
                    link,
                ));
            }

            let target = self.resolve_link(&link)?;
            if target.parent() != Some(source_dir.as_path()) {
                return Err(Error::integrity(
                    "symlink points to non-swiftly-managed executable",
                    link,
                ));
            }

            owned.push(link);
        }

        for link in &owned {
            fs::remove_file(link).map_err(|e| Error::io("failed to remove symlink", link, e))?;
            debug!("Removed symlink: {}", link.display());
        }

        Ok(())
    }

    /// Names that exist in the bin directory and are not links into a
    /// swiftly toolchain.
    fn conflicts(&self, names: &[String]) -> Result<Vec<String>> {
        let mut conflicts = Vec::new();
        for name in names {
            let link = self.bin_dir.join(name);
            let metadata = match fs::symlink_metadata(&link) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(Error::io("failed to inspect executable", &link, e)),
            };

            let managed = metadata.file_type().is_symlink()
                && self.resolve_link(&link)?.starts_with(&self.toolchains_dir);
            if !managed {
                conflicts.push(name.clone());
            }
        }
        Ok(conflicts)
    }

    fn resolve_link(&self, link: &Path) -> Result<PathBuf> {
        let target =
            fs::read_link(link).map_err(|e| Error::io("failed to read symlink", link, e))?;
        Ok(if target.is_relative() {
            self.bin_dir.join(target)
        } else {
            target
        })
    }
}

/// Sorted entry names of a toolchain bin directory.
fn executable_names(dir: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(dir).map_err(|e| Error::io("failed to read toolchain bin directory", dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io("failed to read toolchain bin directory", dir, e))?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}
