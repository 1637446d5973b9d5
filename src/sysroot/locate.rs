//! Discovery of `populate_sysroot` manifests in a build directory.
use std::path::{Path, PathBuf};

use super::manifest::ManifestFile;
use crate::error::SysrootError;

/// Location of the sstate control files relative to the build directory.
pub const SSTATE_CONTROL: &str = "tmp/sstate-control";

/// `<build>/tmp/sstate-control`.
#[must_use]
pub fn sstate_control_dir(build: &Path) -> PathBuf {
    build.join(SSTATE_CONTROL)
}

/// Find every `manifest-*.populate_sysroot` in the build's sstate control
/// directory, sorted by file name.
///
/// # Errors
///
/// Returns [`SysrootError::PrerequisiteMissing`] if the control directory
/// does not exist, or [`SysrootError::Io`] if it cannot be listed.
pub fn locate_manifests(build: &Path) -> Result<Vec<ManifestFile>, SysrootError> {
    let dir = sstate_control_dir(build);
    if !dir.is_dir() {
        return Err(SysrootError::PrerequisiteMissing {
            what: "tmp/sstate-control dir",
            path: dir,
        });
    }

    let mut manifests = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(|e| SysrootError::io("read directory", &dir, e))? {
        let entry = entry.map_err(|e| SysrootError::io("read directory", &dir, e))?;
        let is_file = entry.file_type().is_ok_and(|t| t.is_file());
        if !is_file {
            continue;
        }
        if let Some(manifest) = ManifestFile::from_path(&entry.path()) {
            manifests.push(manifest);
        }
    }
    manifests.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(manifests)
}
