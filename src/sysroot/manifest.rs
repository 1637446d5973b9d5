//! `populate_sysroot` manifest files and their entries.
use std::path::{Path, PathBuf};

use crate::error::SysrootError;

const MANIFEST_PREFIX: &str = "manifest-";
const MANIFEST_SUFFIX: &str = ".populate_sysroot";

/// One `manifest-<package>.populate_sysroot` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Path to the manifest.
    pub path: PathBuf,
    /// Package name taken from the file name.
    pub package: String,
}

/// A single source path listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 1-based line number in the manifest.
    pub line: usize,
    /// Absolute source path, trimmed.
    pub source: String,
}

impl ManifestEntry {
    /// A trailing `/` marks a directory that must exist but has no content
    /// of its own.
    #[must_use]
    pub fn is_directory_marker(&self) -> bool {
        self.source.ends_with('/')
    }

    /// Placeholder artifacts the build system patches later; never shipped.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.source.ends_with("/fixmepath") || self.source.ends_with("/fixmepath.cmd")
    }
}

/// The parsed contents of one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestLines {
    /// Non-blank entries in file order.
    pub entries: Vec<ManifestEntry>,
    /// Line numbers of blank lines that were skipped.
    pub blank_lines: Vec<usize>,
}

impl ManifestFile {
    /// Recognise a manifest by its file name.
    ///
    /// Returns `None` unless the name is `manifest-<package>.populate_sysroot`
    /// with a non-empty `<package>`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let package = path
            .file_name()?
            .to_str()?
            .strip_prefix(MANIFEST_PREFIX)?
            .strip_suffix(MANIFEST_SUFFIX)?;
        if package.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            package: package.to_string(),
        })
    }

    /// Read the manifest's entries in order.
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::Io`] if the file cannot be read.
    pub fn read_entries(&self) -> Result<ManifestLines, SysrootError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| SysrootError::io("read manifest", &self.path, e))?;
        Ok(parse_lines(&text))
    }
}

/// Split manifest text into trimmed entries, setting blank lines aside.
#[must_use]
pub fn parse_lines(text: &str) -> ManifestLines {
    let mut parsed = ManifestLines::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let source = raw.trim();
        if source.is_empty() {
            parsed.blank_lines.push(line);
        } else {
            parsed.entries.push(ManifestEntry {
                line,
                source: source.to_string(),
            });
        }
    }
    parsed
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn from_path_extracts_package_name() {
        let m = ManifestFile::from_path(Path::new(
            "/b/tmp/sstate-control/manifest-armv7a-zlib.populate_sysroot",
        ))
        .unwrap();
        assert_eq!(m.package, "armv7a-zlib");
    }

    #[test]
    fn from_path_rejects_other_tasks() {
        assert!(ManifestFile::from_path(Path::new("manifest-zlib.package")).is_none());
        assert!(ManifestFile::from_path(Path::new("index-armv7a")).is_none());
        assert!(ManifestFile::from_path(Path::new("manifest-.populate_sysroot")).is_none());
    }

    #[test]
    fn parse_lines_trims_and_keeps_order() {
        let parsed = parse_lines("  /b/tmp/a/  \n/b/tmp/a/file\t\n");
        let sources: Vec<&str> = parsed.entries.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["/b/tmp/a/", "/b/tmp/a/file"]);
        assert_eq!(parsed.entries[1].line, 2);
        assert!(parsed.blank_lines.is_empty());
    }

    #[test]
    fn parse_lines_sets_blank_lines_aside() {
        let parsed = parse_lines("/b/one\n\n   \n/b/two\n");
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.blank_lines, vec![2, 3]);
        assert_eq!(parsed.entries[1].line, 4);
    }

    #[test]
    fn entry_shapes() {
        let dir = ManifestEntry {
            line: 1,
            source: "/b/tmp/sysroots-components/x/zlib/usr/".to_string(),
        };
        assert!(dir.is_directory_marker());
        assert!(!dir.is_placeholder());

        for placeholder in ["/b/x/fixmepath", "/b/x/fixmepath.cmd"] {
            let e = ManifestEntry {
                line: 1,
                source: placeholder.to_string(),
            };
            assert!(e.is_placeholder(), "{placeholder} should be skipped");
        }

        let not_placeholder = ManifestEntry {
            line: 1,
            source: "/b/x/notfixmepath".to_string(),
        };
        assert!(!not_placeholder.is_placeholder());
    }

    #[test]
    fn read_entries_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest-zlib.populate_sysroot");
        std::fs::write(&path, "/b/one\n/b/two\n").unwrap();
        let m = ManifestFile::from_path(&path).unwrap();
        assert_eq!(m.read_entries().unwrap().entries.len(), 2);
    }

    #[test]
    fn read_entries_missing_file_is_io_error() {
        let m = ManifestFile::from_path(Path::new(
            "/nonexistent/manifest-zlib.populate_sysroot",
        ))
        .unwrap();
        assert!(matches!(m.read_entries(), Err(SysrootError::Io { .. })));
    }
}
