//! Hostpack bundle policy
//!
//! Decisions a single-file bundle writer needs for one deployment target:
//! - **target**: header version, default options, assembly alignment, and
//!   host components that must stay outside the bundle
//! - **native**: whether a file is a native executable image for the
//!   target OS (PE, Mach-O, or ELF sniffing)
//! - **platform** / **version**: closed OS and architecture enums, runtime
//!   identifiers, framework versions
//! - **config**: `hostpack.toml` and `HOSTPACK_*` overrides

pub mod config;
pub mod error;
pub mod native;
pub mod options;
pub mod platform;
pub mod target;
pub mod version;

pub use config::{HostpackConfig, TargetConfig, CONFIG_FILE_NAME};
pub use error::{BundleError, Result};
pub use native::{is_native_binary, ImageFormat};
pub use options::{BundleOptions, FileType};
pub use platform::{Architecture, HostPlatform, Os, Platform};
pub use target::{
    alignment_for, display_assembly_name, file_type_for, host_fxr_name, host_policy_name,
    should_exclude_component, TargetInfo,
};
pub use version::FrameworkVersion;
