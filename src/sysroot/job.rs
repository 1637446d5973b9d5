//! One sysroot materialization run: preconditions, then every manifest.
use std::io;
use std::path::{Component, Path, PathBuf};

use super::classify::classify;
use super::locate::locate_manifests;
use super::manifest::ManifestFile;
use super::materialize::{Action, Materializer};
use super::rewrite::PathRewriter;
use crate::error::SysrootError;
use crate::logging::Log;

/// Counters collected over a run, for the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    /// Manifests found in the sstate control directory.
    pub manifests: usize,
    /// Manifests skipped because their package is excluded.
    pub excluded: usize,
    /// Directory markers applied.
    pub directories: usize,
    /// Regular files copied.
    pub files: usize,
    /// Directory trees copied.
    pub trees: usize,
    /// Symlinks created.
    pub symlinks: usize,
    /// Symlinks that already matched.
    pub symlinks_unchanged: usize,
    /// `fixmepath` placeholder entries skipped.
    pub placeholders: usize,
    /// Blank manifest lines skipped.
    pub blank_lines: usize,
}

impl MaterializeStats {
    const fn record(&mut self, action: Action) {
        match action {
            Action::Directory => self.directories += 1,
            Action::Tree => self.trees += 1,
            Action::Symlink => self.symlinks += 1,
            Action::SymlinkUnchanged => self.symlinks_unchanged += 1,
            Action::File => self.files += 1,
        }
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} manifests ({} excluded): {} files, {} trees, {} symlinks ({} unchanged), {} dirs, {} placeholders skipped",
            self.manifests,
            self.excluded,
            self.files,
            self.trees,
            self.symlinks,
            self.symlinks_unchanged,
            self.directories,
            self.placeholders,
        )
    }
}

/// Make `path` absolute and fold `.` and `..` textually.
///
/// Links are not resolved, so the result matches the paths the build system
/// wrote into its manifests. `..` at the root stays at the root.
///
/// # Errors
///
/// Returns the error of [`std::path::absolute`] for a relative path when the
/// current directory cannot be read.
pub fn absolute_lexical(path: &Path) -> io::Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// A sysroot materialization from `build` into `root`.
#[derive(Debug, Clone)]
pub struct Job {
    build: PathBuf,
    root: PathBuf,
}

impl Job {
    /// Create a job, making both paths absolute with [`absolute_lexical`].
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::Io`] if the current directory is needed and
    /// cannot be determined.
    pub fn new(build: &Path, root: &Path) -> Result<Self, SysrootError> {
        let absolute =
            |p: &Path| absolute_lexical(p).map_err(|e| SysrootError::io("resolve", p, e));
        Ok(Self {
            build: absolute(build)?,
            root: absolute(root)?,
        })
    }

    /// The absolute build directory.
    #[must_use]
    pub fn build(&self) -> &Path {
        &self.build
    }

    /// The absolute destination root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check preconditions, then populate `root` from every manifest.
    ///
    /// Stops at the first failure, leaving whatever was already written in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`SysrootError::PrerequisiteMissing`] if the build or sstate
    /// control directory is absent, [`SysrootError::DestinationNotEmpty`] if
    /// `root` has content, and any error raised while rewriting or copying
    /// an entry.
    pub fn run(&self, log: &dyn Log) -> Result<MaterializeStats, SysrootError> {
        log.stage("Checking prerequisites");
        self.check_build_dir()?;
        self.check_destination()?;

        log.stage("Locating manifests");
        let manifests = locate_manifests(&self.build)?;
        log.info(&format!("found {} populate_sysroot manifests", manifests.len()));

        std::fs::create_dir_all(&self.root)
            .map_err(|e| SysrootError::io("create directory", &self.root, e))?;

        log.stage("Populating sysroot");
        let rewriter = PathRewriter::new(&self.build)?;
        let materializer = Materializer::new(log);
        let mut stats = MaterializeStats {
            manifests: manifests.len(),
            ..MaterializeStats::default()
        };

        for manifest in &manifests {
            let classification = classify(&manifest.package);
            let Some(subtree) = classification.subtree() else {
                log.debug(&format!(
                    "{}: excluded (conflicts with libgcc), skipping",
                    manifest.package
                ));
                stats.excluded += 1;
                continue;
            };
            log.debug(&format!("{}: -> {subtree}", manifest.package));
            self.populate(
                manifest,
                &self.root.join(subtree),
                &rewriter,
                &materializer,
                &mut stats,
                log,
            )?;
        }

        log.info(&stats.summary());
        Ok(stats)
    }

    fn check_build_dir(&self) -> Result<(), SysrootError> {
        if self.build.exists() {
            Ok(())
        } else {
            Err(SysrootError::PrerequisiteMissing {
                what: "build dir",
                path: self.build.clone(),
            })
        }
    }

    fn check_destination(&self) -> Result<(), SysrootError> {
        if !self.root.exists() {
            return Ok(());
        }
        if !self.root.is_dir() {
            return Err(SysrootError::io(
                "read destination",
                &self.root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        let mut entries = std::fs::read_dir(&self.root)
            .map_err(|e| SysrootError::io("read destination", &self.root, e))?;
        if entries.next().is_some() {
            return Err(SysrootError::DestinationNotEmpty {
                path: self.root.clone(),
            });
        }
        Ok(())
    }

    fn populate(
        &self,
        manifest: &ManifestFile,
        subtree_root: &Path,
        rewriter: &PathRewriter,
        materializer: &Materializer<'_>,
        stats: &mut MaterializeStats,
        log: &dyn Log,
    ) -> Result<(), SysrootError> {
        let lines = manifest.read_entries()?;
        for line in &lines.blank_lines {
            log.debug(&format!(
                "{}: line {line} is blank, skipping",
                manifest.path.display()
            ));
        }
        stats.blank_lines += lines.blank_lines.len();

        for entry in &lines.entries {
            if entry.is_placeholder() {
                log.debug(&format!("skip placeholder {}", entry.source));
                stats.placeholders += 1;
                continue;
            }
            let dest = rewriter.rewrite(&entry.source, subtree_root)?;
            stats.record(materializer.apply(&entry.source, &dest)?);
        }
        Ok(())
    }
}
