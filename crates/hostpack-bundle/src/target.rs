//! Bundle target policy
//!
//! Resolves the layout rules a single-file bundle must follow for a given
//! (OS, architecture, framework version):
//! - **bundle header version**: which on-disk format the bootstrap expects
//! - **default options**: what gets embedded when the caller says nothing
//! - **assembly alignment**: byte boundary each embedded assembly starts on
//! - **exclusions**: host components that must stay outside the bundle
//!
//! ```text
//!  framework major │ header version │ default options
//! ─────────────────┼────────────────┼──────────────────
//!        3         │       1        │ BundleAllContent
//!        5         │       2        │ None
//!       >= 6       │       6        │ None
//! ```

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{BundleError, Result};
use crate::native;
use crate::options::{BundleOptions, FileType};
use crate::platform::{Architecture, HostPlatform, Os};
use crate::version::FrameworkVersion;

/// One row of the framework-version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleVersionRow {
    pub min_major: u32,
    /// Inclusive upper bound; `None` means every later major.
    pub max_major: Option<u32>,
    pub bundle_major_version: u32,
    pub default_options: BundleOptions,
}

impl BundleVersionRow {
    fn matches(&self, major: u32) -> bool {
        major >= self.min_major && self.max_major.map_or(true, |max| major <= max)
    }
}

/// Supported framework majors, ascending. Majors not covered by any row
/// (1, 2, 4) have no bundle format.
pub const BUNDLE_VERSION_TABLE: [BundleVersionRow; 3] = [
    BundleVersionRow {
        min_major: 3,
        max_major: Some(3),
        bundle_major_version: 1,
        default_options: BundleOptions::BUNDLE_ALL_CONTENT,
    },
    BundleVersionRow {
        min_major: 5,
        max_major: Some(5),
        bundle_major_version: 2,
        default_options: BundleOptions::NONE,
    },
    BundleVersionRow {
        min_major: 6,
        max_major: None,
        bundle_major_version: 6,
        default_options: BundleOptions::NONE,
    },
];

/// Look up the table row for a framework major version.
pub fn bundle_version_row(major: u32) -> Option<&'static BundleVersionRow> {
    BUNDLE_VERSION_TABLE.iter().find(|row| row.matches(major))
}

/// Byte alignment of embedded assemblies for a target.
pub fn alignment_for(os: Os, arch: Architecture) -> u32 {
    match (os, arch) {
        // Partial mapping of R2R sections (MapViewOfFile3) needs 4K granularity.
        (Os::Windows, _) => 4096,
        // Match the page size so R2R code can be mmapped in place.
        (_, Architecture::LoongArch64) => 16384,
        (_, Architecture::Arm64) => 4096,
        // Cache-line alignment only.
        (_, _) => 64,
    }
}

/// File name of the runtime-resolution library on `os`.
pub fn host_fxr_name(os: Os) -> &'static str {
    match os {
        Os::Windows => "hostfxr.dll",
        Os::Osx => "libhostfxr.dylib",
        Os::Linux | Os::FreeBsd | Os::Illumos => "libhostfxr.so",
    }
}

/// File name of the runtime-policy library on `os`.
pub fn host_policy_name(os: Os) -> &'static str {
    match os {
        Os::Windows => "hostpolicy.dll",
        Os::Osx => "libhostpolicy.dylib",
        Os::Linux | Os::FreeBsd | Os::Illumos => "libhostpolicy.so",
    }
}

/// Whether `relative_path` must be left out of a bundle.
///
/// From framework 5 on, bundle extraction runs inside hostfxr and
/// hostpolicy, so those two libraries cannot live inside the bundle. The
/// framework 3 bootstrap extracts by itself and may embed them.
pub fn should_exclude_component(os: Os, relative_path: &str, framework_major: u32) -> bool {
    framework_major != 3
        && (relative_path == host_fxr_name(os) || relative_path == host_policy_name(os))
}

/// The file type to record in the manifest for a given header version.
///
/// Header version 1 bootstraps ignore the value but still range-check it,
/// so every file is recorded as the first enumerator.
pub fn file_type_for(file_type: FileType, bundle_major_version: u32) -> FileType {
    if bundle_major_version == 1 {
        FileType::FIRST
    } else {
        file_type
    }
}

/// Logical assembly name for a host binary: the extension is dropped on
/// Windows and kept everywhere else.
pub fn display_assembly_name(host_name: &str, os: Os) -> String {
    if !os.is_windows() {
        return host_name.to_string();
    }
    Path::new(host_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(host_name)
        .to_string()
}

/// Resolved bundle policy for one target.
///
/// Immutable once built; all derived fields are functions of
/// `(os, arch, framework.major)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetInfo {
    os: Os,
    arch: Architecture,
    framework: FrameworkVersion,
    bundle_major_version: u32,
    default_options: BundleOptions,
    assembly_alignment: u32,
}

impl TargetInfo {
    /// Resolve the policy for a target, filling unspecified parts from
    /// `host`.
    ///
    /// Fails with [`BundleError::UnsupportedFrameworkVersion`] when the
    /// framework major has no bundle format.
    pub fn resolve(
        host: &HostPlatform,
        os: Option<Os>,
        arch: Option<Architecture>,
        framework: Option<FrameworkVersion>,
    ) -> Result<Self> {
        let os = os.unwrap_or(host.os);
        let arch = arch.unwrap_or(host.arch);
        let framework = framework.unwrap_or_else(|| host.framework.clone());

        let row = bundle_version_row(framework.major)
            .ok_or_else(|| BundleError::UnsupportedFrameworkVersion(framework.to_string()))?;

        let info = Self {
            os,
            arch,
            bundle_major_version: row.bundle_major_version,
            default_options: row.default_options,
            assembly_alignment: alignment_for(os, arch),
            framework,
        };

        tracing::debug!(
            target_os = %info.os,
            target_arch = %info.arch,
            framework = %info.framework,
            bundle_version = info.bundle_major_version,
            alignment = info.assembly_alignment,
            "resolved bundle target"
        );

        Ok(info)
    }

    /// Resolve a target with every part given explicitly.
    pub fn new(os: Os, arch: Architecture, framework: FrameworkVersion) -> Result<Self> {
        let host = HostPlatform::new(os, arch, framework);
        Self::resolve(&host, None, None, None)
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Architecture {
        self.arch
    }

    pub fn framework(&self) -> &FrameworkVersion {
        &self.framework
    }

    pub fn bundle_major_version(&self) -> u32 {
        self.bundle_major_version
    }

    pub fn default_options(&self) -> BundleOptions {
        self.default_options
    }

    pub fn assembly_alignment(&self) -> u32 {
        self.assembly_alignment
    }

    pub fn is_windows(&self) -> bool {
        self.os.is_windows()
    }

    pub fn is_osx(&self) -> bool {
        self.os.is_osx()
    }

    /// Round `offset` up to the next assembly boundary.
    pub fn aligned_offset(&self, offset: u64) -> u64 {
        let align = u64::from(self.assembly_alignment);
        offset.div_ceil(align) * align
    }

    /// See [`should_exclude_component`].
    pub fn should_exclude(&self, relative_path: &str) -> bool {
        should_exclude_component(self.os, relative_path, self.framework.major)
    }

    /// See [`file_type_for`].
    pub fn file_type_for(&self, file_type: FileType) -> FileType {
        file_type_for(file_type, self.bundle_major_version)
    }

    /// See [`display_assembly_name`].
    pub fn assembly_name(&self, host_name: &str) -> String {
        display_assembly_name(host_name, self.os)
    }

    /// Whether `path` is a native executable image for this target's OS.
    pub fn is_native_binary(&self, path: &Path) -> bool {
        native::is_native_binary(self.os, path)
    }
}

impl fmt::Display for TargetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OS: {} Arch: {} FrameworkVersion: {}",
            self.os, self.arch, self.framework
        )
    }
}
