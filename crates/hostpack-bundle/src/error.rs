//! Error types for target resolution.

/// Errors raised while resolving a bundle target.
///
/// Native image sniffing never produces one of these: an unreadable file is
/// simply not a native binary.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// Framework major version with no bundle format
    #[error("Unsupported target framework version: {0}")]
    UnsupportedFrameworkVersion(String),

    /// Version string that does not parse
    #[error("Invalid framework version: {0}")]
    InvalidFrameworkVersion(String),

    /// Operating system token outside the known set
    #[error("Unknown operating system: {0}")]
    UnknownOs(String),

    /// Architecture token outside the known set
    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),

    /// Malformed runtime identifier
    #[error("Invalid runtime identifier: {0}")]
    InvalidRid(String),

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// File I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BundleError>;
