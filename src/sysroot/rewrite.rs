//! Mapping of build-internal source paths into a sysroot subtree.
use std::path::{Path, PathBuf};

use crate::error::SysrootError;

/// Number of leading `/`-separated segments dropped after the build prefix.
///
/// The remainder starts with `/`, so the first segment is empty; the other
/// four are staging layers such as `tmp/sysroots-components/<arch>/<recipe>`.
pub const STAGING_SEGMENTS: usize = 5;

/// Rewrites manifest paths relative to one build directory.
#[derive(Debug, Clone)]
pub struct PathRewriter {
    build_prefix: String,
}

impl PathRewriter {
    /// Create a rewriter for `build`.
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::PathRewriteFailure`] if `build` is not valid
    /// UTF-8 (manifest lines are text and are matched textually).
    pub fn new(build: &Path) -> Result<Self, SysrootError> {
        let prefix = build.to_str().ok_or_else(|| SysrootError::PathRewriteFailure {
            source_path: build.display().to_string(),
            reason: "build dir is not valid UTF-8".to_string(),
        })?;
        Ok(Self {
            build_prefix: prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Map `source` to its location under `subtree_root`.
    ///
    /// Purely textual: the filesystem is not consulted. A trailing `/` on
    /// `source` survives as a trailing `/` on the result.
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::PathRewriteFailure`] if `source` is not under
    /// the build directory or has fewer than [`STAGING_SEGMENTS`] segments
    /// after the build prefix.
    pub fn rewrite(&self, source: &str, subtree_root: &Path) -> Result<PathBuf, SysrootError> {
        let fail = |reason: String| SysrootError::PathRewriteFailure {
            source_path: source.to_string(),
            reason,
        };

        let rest = source
            .strip_prefix(&self.build_prefix)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| fail(format!("not under build dir {}", self.build_prefix)))?;

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() < STAGING_SEGMENTS {
            return Err(fail(format!(
                "expected at least {STAGING_SEGMENTS} path segments after the build dir, found {}",
                segments.len()
            )));
        }
        let relative = segments
            .get(STAGING_SEGMENTS..)
            .map(|tail| tail.join("/"))
            .unwrap_or_default();

        if relative.is_empty() {
            Ok(subtree_root.to_path_buf())
        } else {
            Ok(subtree_root.join(relative))
        }
    }
}
