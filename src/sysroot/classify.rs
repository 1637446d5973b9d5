//! Package classification: which subtree a package's outputs belong to.

/// Subtree name for cross-compiled target artifacts.
pub const TARGET_SUBTREE: &str = "sysroot";

/// Subtree name for host-usable native tools.
pub const NATIVE_SUBTREE: &str = "sysroot-native";

/// Where a package's populated files go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageClassification {
    /// Never copied. `libgcc-initial` is superseded by the later `libgcc`
    /// and would conflict with it.
    Excluded,
    /// Host-side toolchain and support outputs.
    Native,
    /// Outputs for the cross-compiled root.
    Target,
}

impl PackageClassification {
    /// Destination subtree name, `None` for [`Excluded`](Self::Excluded).
    #[must_use]
    pub const fn subtree(self) -> Option<&'static str> {
        match self {
            Self::Excluded => None,
            Self::Native => Some(NATIVE_SUBTREE),
            Self::Target => Some(TARGET_SUBTREE),
        }
    }
}

/// Classify a package by its name.
///
/// # Examples
///
/// ```
/// use obmc_tools::sysroot::{PackageClassification, classify};
///
/// assert_eq!(classify("quilt-native"), PackageClassification::Native);
/// assert_eq!(classify("gcc-cross-arm"), PackageClassification::Native);
/// assert_eq!(classify("libgcc-initial"), PackageClassification::Excluded);
/// assert_eq!(classify("zlib"), PackageClassification::Target);
/// ```
#[must_use]
pub fn classify(package: &str) -> PackageClassification {
    if package.ends_with("libgcc-initial") {
        PackageClassification::Excluded
    } else if package.ends_with("-native")
        || package.contains("-cross-")
        || package.contains("-crosssdk")
    {
        PackageClassification::Native
    } else {
        PackageClassification::Target
    }
}
