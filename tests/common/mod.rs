// Shared helpers for integration tests.
//
// Provides a temporary build directory with a `tmp/sstate-control` and a
// `tmp/sysroots-components` tree, a fluent builder for populating it, and a
// recording `Log` so each test can assert on what was logged.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use obmc_tools::logging::Log;
use obmc_tools::sysroot::Job;
use obmc_tools::sysroot::locate::sstate_control_dir;

/// Architecture directory used for every staged component.
pub const ARCH: &str = "armv7ahf-vfpv4d16";

/// A fake OpenBMC build directory plus an empty destination parent, both
/// backed by [`tempfile::TempDir`] and deleted on drop.
pub struct BuildFixture {
    /// Temporary build directory.
    pub build: tempfile::TempDir,
    /// Temporary directory the sysroot root is created under.
    pub dest: tempfile::TempDir,
}

impl BuildFixture {
    /// Create a build directory with an empty sstate control directory.
    pub fn new() -> Self {
        let build = tempfile::tempdir().expect("create build dir");
        std::fs::create_dir_all(sstate_control_dir(build.path()))
            .expect("create sstate-control dir");
        Self {
            build,
            dest: tempfile::tempdir().expect("create dest dir"),
        }
    }

    /// Path to the build directory.
    pub fn build_path(&self) -> &Path {
        self.build.path()
    }

    /// Path of the sysroot root (not created).
    pub fn root_path(&self) -> PathBuf {
        self.dest.path().join("bmcroot")
    }

    /// `<build>/tmp/sysroots-components/<ARCH>/<recipe>/<rel>`.
    pub fn component(&self, recipe: &str, rel: &str) -> PathBuf {
        self.build
            .path()
            .join("tmp/sysroots-components")
            .join(ARCH)
            .join(recipe)
            .join(rel)
    }

    /// A job from this build into [`root_path`](Self::root_path).
    pub fn job(&self) -> Job {
        Job::new(self.build.path(), &self.root_path()).expect("create job")
    }
}

/// Fluent builder for [`BuildFixture`].
pub struct BuildFixtureBuilder {
    fx: BuildFixture,
}

impl BuildFixtureBuilder {
    /// Begin with an empty build directory.
    pub fn new() -> Self {
        Self {
            fx: BuildFixture::new(),
        }
    }

    /// Stage a regular file for `recipe` at `rel` and return `self`.
    pub fn with_file(self, recipe: &str, rel: &str, content: &str) -> Self {
        let path = self.fx.component(recipe, rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create component parent");
        }
        std::fs::write(&path, content).expect("write component file");
        self
    }

    /// Stage a symlink for `recipe` at `rel` pointing at `target`.
    pub fn with_symlink(self, recipe: &str, rel: &str, target: &str) -> Self {
        let path = self.fx.component(recipe, rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create component parent");
        }
        std::os::unix::fs::symlink(target, &path).expect("create component symlink");
        self
    }

    /// Write `manifest-<package>.populate_sysroot` listing `entries`.
    ///
    /// Entries starting with `@` are staged paths relative to the package's
    /// component directory (`@usr/bin/` for a directory marker); anything
    /// else is written verbatim.
    pub fn with_manifest(self, package: &str, entries: &[&str]) -> Self {
        let lines: Vec<String> = entries
            .iter()
            .map(|e| {
                e.strip_prefix('@').map_or_else(
                    || (*e).to_string(),
                    |rel| {
                        let path = self.fx.component(package, rel).display().to_string();
                        if rel.ends_with('/') && !path.ends_with('/') {
                            format!("{path}/")
                        } else {
                            path
                        }
                    },
                )
            })
            .collect();
        let path = sstate_control_dir(self.fx.build.path())
            .join(format!("manifest-{package}.populate_sysroot"));
        std::fs::write(path, lines.join("\n") + "\n").expect("write manifest");
        self
    }

    /// Finish building and return the fixture.
    pub fn build(self) -> BuildFixture {
        self.fx
    }
}

/// A [`Log`] that records `(level, message)` pairs in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingLog {
    /// Messages logged at `level`, in order.
    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
}

/// Every path under `root`, relative and sorted, directories suffixed `/`.
pub fn tree_listing(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            let e = e.expect("walk tree");
            let rel = e
                .path()
                .strip_prefix(root)
                .expect("strip root")
                .display()
                .to_string();
            if e.file_type().is_dir() {
                format!("{rel}/")
            } else {
                rel
            }
        })
        .collect();
    out.sort();
    out
}
