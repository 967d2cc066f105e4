//! Toolchain archive extraction.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use swiftly_core::{Error, Result};
use tar::Archive;
use tracing::debug;

/// Extract a `.tar.gz` archive into `dest`.
///
/// `rename` maps each entry path to its path relative to `dest`; entries it
/// maps to `None` or to an empty path are skipped. Returns the number of
/// entries written.
pub fn extract_archive<F>(archive_path: &Path, dest: &Path, mut rename: F) -> Result<usize>
where
    F: FnMut(&Path) -> Option<PathBuf>,
{
    debug!("Extracting {} to {}", archive_path.display(), dest.display());

    let file =
        File::open(archive_path).map_err(|e| Error::io("failed to open archive", archive_path, e))?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);

    let read_error = |e: std::io::Error| Error::io("failed to read archive", archive_path, e);

    let mut written = 0;
    for entry in archive.entries().map_err(read_error)? {
        let mut entry = entry.map_err(read_error)?;
        let original = entry.path().map_err(read_error)?.into_owned();

        let Some(relative) = rename(&original) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::io(
                format!("archive entry escapes destination: {}", original.display()),
                archive_path,
                std::io::Error::from(std::io::ErrorKind::InvalidData),
            ));
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io("failed to create directory", parent, e))?;
        }
        entry
            .unpack(&target)
            .map_err(|e| Error::io("failed to extract archive entry", &target, e))?;
        written += 1;
    }

    debug!(entries = written, "Extracted {}", archive_path.display());
    Ok(written)
}

/// Renamer that drops the archive's top-level directory.
pub fn strip_top_level(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;
    Some(components.as_path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_archive;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn test_strip_top_level() {
        assert_eq!(
            strip_top_level(Path::new("swift-5.10.1-RELEASE-ubuntu22.04/usr/bin/swift")),
            Some(PathBuf::from("usr/bin/swift"))
        );
        assert_eq!(
            strip_top_level(Path::new("swift-5.10.1-RELEASE-ubuntu22.04")),
            Some(PathBuf::new())
        );
        assert_eq!(strip_top_level(Path::new("")), None);
    }

    #[test]
    fn test_extract_strips_and_keeps_permissions() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("toolchain.tar.gz");
        write_archive(
            &archive,
            &[
                ("swift-5.10.1/usr/bin/swift", "#!/bin/sh\n"),
                ("swift-5.10.1/usr/lib/libFoo.so", "lib"),
            ],
        );

        let dest = temp.path().join("out");
        let written = extract_archive(&archive, &dest, strip_top_level).unwrap();

        assert_eq!(written, 2);
        let swift = dest.join("usr/bin/swift");
        assert_eq!(fs::read_to_string(&swift).unwrap(), "#!/bin/sh\n");
        assert_eq!(fs::metadata(&swift).unwrap().permissions().mode() & 0o777, 0o755);
        assert!(dest.join("usr/lib/libFoo.so").exists());
    }

    #[test]
    fn test_extract_skips_unmapped_entries() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("toolchain.tar.gz");
        write_archive(&archive, &[("top/keep", "a"), ("top/skip", "b")]);

        let dest = temp.path().join("out");
        let written = extract_archive(&archive, &dest, |p| {
            strip_top_level(p).filter(|r| r != Path::new("skip"))
        })
        .unwrap();

        assert_eq!(written, 1);
        assert!(dest.join("keep").exists());
        assert!(!dest.join("skip").exists());
    }

    #[test]
    fn test_extract_rejects_parent_components() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("toolchain.tar.gz");
        write_archive(&archive, &[("top/usr/bin/swift", "a")]);

        let dest = temp.path().join("out");
        let err = extract_archive(&archive, &dest, |_| Some(PathBuf::from("../evil"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!temp.path().join("evil").exists());
    }

    #[test]
    fn test_missing_archive_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = extract_archive(&temp.path().join("nope.tar.gz"), temp.path(), strip_top_level)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
