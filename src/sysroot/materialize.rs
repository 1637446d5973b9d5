//! Filesystem side of sysroot population: directories, trees, symlinks and
//! files, one manifest entry at a time.
use std::fs;
use std::io;
use std::path::Path;

use crate::error::SysrootError;
use crate::logging::Log;

/// What [`Materializer::apply`] did for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Directory ensured (created or already present).
    Directory,
    /// Directory tree copied.
    Tree,
    /// Symlink created.
    Symlink,
    /// Symlink already present with the same target text; nothing written.
    SymlinkUnchanged,
    /// Regular file copied.
    File,
}

/// Applies manifest entries to the destination filesystem.
///
/// Never writes below the source side; every mutation happens at or under
/// the destination path it is given.
pub struct Materializer<'a> {
    log: &'a dyn Log,
}

impl std::fmt::Debug for Materializer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Materializer").finish_non_exhaustive()
    }
}

impl<'a> Materializer<'a> {
    /// Create a materializer that echoes its actions at debug level.
    #[must_use]
    pub const fn new(log: &'a dyn Log) -> Self {
        Self { log }
    }

    /// Materialize `source` at `dest`.
    ///
    /// `source` ending in `/` only ensures `dest` exists. Otherwise the
    /// parent of `dest` is created as needed and `source` is copied as a
    /// tree, replicated as a symlink, or copied as a file.
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::DestinationConflict`] if a tree or symlink
    /// target is already occupied, or [`SysrootError::Io`] for any
    /// filesystem failure.
    pub fn apply(&self, source: &str, dest: &Path) -> Result<Action, SysrootError> {
        if source.ends_with('/') {
            self.log.debug(&format!("mkdirs {}", dest.display()));
            fs::create_dir_all(dest)
                .map_err(|e| SysrootError::io("create directory", dest, e))?;
            return Ok(Action::Directory);
        }

        self.ensure_parent_dir(dest)?;

        let src = Path::new(source);
        if src.is_dir() {
            self.log
                .debug(&format!("copytree {} -> {}", src.display(), dest.display()));
            copy_tree(src, dest)?;
            return Ok(Action::Tree);
        }

        let meta = fs::symlink_metadata(src).map_err(|e| SysrootError::io("stat", src, e))?;
        if meta.file_type().is_symlink() {
            return self.replicate_symlink(src, dest);
        }

        self.log
            .debug(&format!("copy {} -> {}", src.display(), dest.display()));
        copy_file(src, dest)?;
        Ok(Action::File)
    }

    fn ensure_parent_dir(&self, dest: &Path) -> Result<(), SysrootError> {
        if let Some(parent) = dest.parent()
            && !parent.exists()
        {
            self.log.debug(&format!("mkdirs {}", parent.display()));
            fs::create_dir_all(parent)
                .map_err(|e| SysrootError::io("create directory", parent, e))?;
        }
        Ok(())
    }

    /// Recreate the symlink at `src` as `dest`, keeping the link text as-is.
    fn replicate_symlink(&self, src: &Path, dest: &Path) -> Result<Action, SysrootError> {
        let to = fs::read_link(src).map_err(|e| SysrootError::io("read link", src, e))?;

        if fs::symlink_metadata(dest).is_ok() {
            return match fs::read_link(dest) {
                Ok(existing) if existing == to => {
                    self.log
                        .debug(&format!("ok: {} (already linked)", dest.display()));
                    Ok(Action::SymlinkUnchanged)
                }
                _ => Err(SysrootError::DestinationConflict {
                    path: dest.to_path_buf(),
                }),
            };
        }

        self.log
            .debug(&format!("symlink {} -> {}", dest.display(), to.display()));
        std::os::unix::fs::symlink(&to, dest)
            .map_err(|e| SysrootError::io("create symlink", dest, e))?;
        Ok(Action::Symlink)
    }
}

/// Copy the regular file `src` to `dest`, preserving permission bits.
///
/// Neither side is dereferenced: a symlink at `src` is rejected rather than
/// followed, and an existing symlink at `dest` is a conflict rather than a
/// write-through.
///
/// # Errors
///
/// Returns [`SysrootError::DestinationConflict`] if `dest` is a symlink or
/// directory, or [`SysrootError::Io`] if the copy fails.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, SysrootError> {
    let meta = fs::symlink_metadata(src).map_err(|e| SysrootError::io("stat", src, e))?;
    if !meta.file_type().is_file() {
        return Err(SysrootError::io(
            "copy",
            src,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    if let Ok(existing) = fs::symlink_metadata(dest)
        && !existing.file_type().is_file()
    {
        return Err(SysrootError::DestinationConflict {
            path: dest.to_path_buf(),
        });
    }
    // std::fs::copy carries the source permission bits over on Unix.
    fs::copy(src, dest).map_err(|e| SysrootError::io("copy", dest, e))
}

/// Recursively copy the directory `src` to `dest`, which must not exist.
///
/// Symlinks inside the tree are followed and their content copied. Files
/// and directories keep their permission bits; directory modes are applied
/// after the contents are written, deepest first, so read-only source
/// directories copy cleanly.
///
/// # Errors
///
/// Returns [`SysrootError::DestinationConflict`] if `dest` already exists,
/// or [`SysrootError::Io`] if any entry cannot be read or written
/// (including dangling links and link loops).
pub fn copy_tree(src: &Path, dest: &Path) -> Result<(), SysrootError> {
    if fs::symlink_metadata(dest).is_ok() {
        return Err(SysrootError::DestinationConflict {
            path: dest.to_path_buf(),
        });
    }
    let root_perms = fs::metadata(src)
        .map_err(|e| SysrootError::io("stat", src, e))?
        .permissions();
    fs::create_dir(dest).map_err(|e| SysrootError::io("create directory", dest, e))?;
    let mut dir_modes = vec![(dest.to_path_buf(), root_perms)];

    for entry in walkdir::WalkDir::new(src).follow_links(true).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            SysrootError::io("walk", &path, io::Error::from(e))
        })?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SysrootError::io("walk", entry.path(), io::Error::other(e)))?;
        let out = dest.join(rel);
        if entry.file_type().is_dir() {
            let perms = entry
                .metadata()
                .map_err(|e| SysrootError::io("stat", entry.path(), io::Error::from(e)))?
                .permissions();
            fs::create_dir(&out).map_err(|e| SysrootError::io("create directory", &out, e))?;
            dir_modes.push((out, perms));
        } else {
            fs::copy(entry.path(), &out).map_err(|e| SysrootError::io("copy", &out, e))?;
        }
    }

    for (dir, perms) in dir_modes.into_iter().rev() {
        fs::set_permissions(&dir, perms)
            .map_err(|e| SysrootError::io("set permissions", &dir, e))?;
    }
    Ok(())
}
