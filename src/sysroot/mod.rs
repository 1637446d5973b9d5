//! Sysroot materialization from `populate_sysroot` manifests.
//!
//! A Yocto/OpenBMC build records, per recipe, every path its
//! `populate_sysroot` task installed into
//! `tmp/sstate-control/manifest-<package>.populate_sysroot`. This module
//! replays those manifests into a standalone directory with two subtrees:
//! `sysroot` for target artifacts and `sysroot-native` for host tools.
//!
//! - [`locate`] finds the manifests
//! - [`manifest`] reads them
//! - [`classify`] picks the subtree per package
//! - [`rewrite`] maps source paths into the subtree
//! - [`materialize`] touches the filesystem
//! - [`job`] drives a whole run
//! - [`usage`] renders the post-run environment hints

pub mod classify;
pub mod job;
pub mod locate;
pub mod manifest;
pub mod materialize;
pub mod rewrite;
pub mod usage;

pub use classify::{NATIVE_SUBTREE, PackageClassification, TARGET_SUBTREE, classify};
pub use job::{Job, MaterializeStats, absolute_lexical};
pub use locate::locate_manifests;
pub use manifest::{ManifestEntry, ManifestFile};
pub use materialize::{Action, Materializer};
pub use rewrite::PathRewriter;
pub use usage::{DEFAULT_TARGET_SYS, render_usage};
