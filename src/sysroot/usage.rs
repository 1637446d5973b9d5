//! Environment setup hints printed after a successful run.
use std::fmt::Write as _;
use std::path::Path;

use super::classify::{NATIVE_SUBTREE, TARGET_SUBTREE};

/// Default toolchain prefix of OpenBMC ARM builds.
pub const DEFAULT_TARGET_SYS: &str = "arm-openbmc-linux-gnueabi";

/// Render the usage summary for a sysroot populated at `root`.
#[must_use]
pub fn render_usage(root: &Path, target_sys: &str) -> String {
    let root = root.display();
    let native = format!("{root}/{NATIVE_SUBTREE}");
    let sysroot = format!("{root}/{TARGET_SUBTREE}");

    let path_entries = [
        format!("{native}/usr/bin/{target_sys}"),
        format!("{sysroot}/usr/bin/crossscripts"),
        format!("{native}/usr/sbin"),
        format!("{native}/usr/bin"),
        format!("{native}/sbin"),
        format!("{native}/bin"),
    ];

    let mut out = String::from("*** setup bmc sysroot succeeded! ***\n\nexport PATH=\\\n");
    for entry in &path_entries {
        let _ = writeln!(out, "{entry}:\\");
    }
    out.push_str("$PATH\n\n");
    let _ = writeln!(out, "GCC --sysroot={sysroot}, e.g.,");
    let _ = writeln!(out, "{target_sys}-gcc --sysroot={sysroot} -o x x.c");
    let _ = writeln!(out, "{target_sys}-gdb ./x");
    out
}
