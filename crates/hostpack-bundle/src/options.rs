//! Bundle options and file types
//!
//! Both values are written into the bundle header and manifest, so their
//! numeric encodings are fixed.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Set of bundling options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleOptions(u64);

impl BundleOptions {
    pub const NONE: BundleOptions = BundleOptions(0);
    /// Embed native binaries alongside managed assemblies.
    pub const BUNDLE_NATIVE_BINARIES: BundleOptions = BundleOptions(1);
    /// Embed content files other than assemblies and native binaries.
    pub const BUNDLE_OTHER_FILES: BundleOptions = BundleOptions(2);
    pub const BUNDLE_ALL_CONTENT: BundleOptions = BundleOptions(1 | 2);
    /// Embed symbol files.
    pub const BUNDLE_SYMBOL_FILES: BundleOptions = BundleOptions(4);
    pub const ENABLE_COMPRESSION: BundleOptions = BundleOptions(8);

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every flag in `other` is also set in `self`.
    pub const fn contains(self, other: BundleOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for BundleOptions {
    type Output = BundleOptions;

    fn bitor(self, rhs: BundleOptions) -> BundleOptions {
        BundleOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for BundleOptions {
    fn bitor_assign(&mut self, rhs: BundleOptions) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for BundleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let mut names = Vec::new();
        if self.contains(BundleOptions::BUNDLE_ALL_CONTENT) {
            names.push("BundleAllContent");
        } else if self.contains(BundleOptions::BUNDLE_NATIVE_BINARIES) {
            names.push("BundleNativeBinaries");
        } else if self.contains(BundleOptions::BUNDLE_OTHER_FILES) {
            names.push("BundleOtherFiles");
        }
        if self.contains(BundleOptions::BUNDLE_SYMBOL_FILES) {
            names.push("BundleSymbolFiles");
        }
        if self.contains(BundleOptions::ENABLE_COMPRESSION) {
            names.push("EnableCompression");
        }
        f.write_str(&names.join(" | "))
    }
}

/// Kind of a file recorded in the bundle manifest.
///
/// The discriminants are part of the on-disk format; `Unknown` must stay
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FileType {
    Unknown = 0,
    Assembly = 1,
    NativeBinary = 2,
    DepsJson = 3,
    RuntimeConfigJson = 4,
    Symbols = 5,
}

impl FileType {
    /// First enumerator, the value legacy bootstraps accept for any file.
    pub const FIRST: FileType = FileType::Unknown;

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(FileType::Unknown),
            1 => Some(FileType::Assembly),
            2 => Some(FileType::NativeBinary),
            3 => Some(FileType::DepsJson),
            4 => Some(FileType::RuntimeConfigJson),
            5 => Some(FileType::Symbols),
            _ => None,
        }
    }
}
