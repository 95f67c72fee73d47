//! Target platform identifiers
//!
//! Operating systems and CPU architectures are closed enumerations, so every
//! table keyed on them is an exhaustive `match`. String tokens (CLI flags,
//! config files, runtime identifiers) are parsed at the boundary and
//! rejected if unknown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, Result};
use crate::version::FrameworkVersion;

/// Operating system a bundle targets.
///
/// Serialized as its short name; deserialized through [`FromStr`], so config
/// files accept the same tokens as flags and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Os {
    Windows,
    Linux,
    Osx,
    FreeBsd,
    Illumos,
}

impl Os {
    pub const ALL: [Os; 5] = [Os::Windows, Os::Linux, Os::Osx, Os::FreeBsd, Os::Illumos];

    /// Short lowercase name, as used in runtime identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Windows => "win",
            Os::Linux => "linux",
            Os::Osx => "osx",
            Os::FreeBsd => "freebsd",
            Os::Illumos => "illumos",
        }
    }

    pub fn is_windows(self) -> bool {
        self == Os::Windows
    }

    pub fn is_osx(self) -> bool {
        self == Os::Osx
    }

    /// Map a `std::env::consts::OS` value.
    pub fn from_rust_os(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "macos" => Ok(Os::Osx),
            "freebsd" => Ok(Os::FreeBsd),
            "illumos" | "solaris" => Ok(Os::Illumos),
            other => Err(BundleError::UnknownOs(other.to_string())),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" | "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            "osx" | "macos" | "darwin" => Ok(Os::Osx),
            "freebsd" => Ok(Os::FreeBsd),
            "illumos" => Ok(Os::Illumos),
            _ => Err(BundleError::UnknownOs(s.to_string())),
        }
    }
}

impl TryFrom<String> for Os {
    type Error = BundleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Os> for String {
    fn from(os: Os) -> String {
        os.as_str().to_string()
    }
}

/// CPU architecture a bundle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Architecture {
    X86,
    X64,
    Arm,
    Arm64,
    Wasm,
    S390x,
    LoongArch64,
    Armv6,
    Ppc64le,
    RiscV64,
}

impl Architecture {
    pub const ALL: [Architecture; 10] = [
        Architecture::X86,
        Architecture::X64,
        Architecture::Arm,
        Architecture::Arm64,
        Architecture::Wasm,
        Architecture::S390x,
        Architecture::LoongArch64,
        Architecture::Armv6,
        Architecture::Ppc64le,
        Architecture::RiscV64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::Arm => "arm",
            Architecture::Arm64 => "arm64",
            Architecture::Wasm => "wasm",
            Architecture::S390x => "s390x",
            Architecture::LoongArch64 => "loongarch64",
            Architecture::Armv6 => "armv6",
            Architecture::Ppc64le => "ppc64le",
            Architecture::RiscV64 => "riscv64",
        }
    }

    /// Map a `std::env::consts::ARCH` value.
    pub fn from_rust_arch(arch: &str) -> Result<Self> {
        match arch {
            "x86" => Ok(Architecture::X86),
            "x86_64" => Ok(Architecture::X64),
            "arm" => Ok(Architecture::Arm),
            "aarch64" => Ok(Architecture::Arm64),
            "wasm32" | "wasm64" => Ok(Architecture::Wasm),
            "s390x" => Ok(Architecture::S390x),
            "loongarch64" => Ok(Architecture::LoongArch64),
            "powerpc64" if cfg!(target_endian = "little") => Ok(Architecture::Ppc64le),
            "riscv64" => Ok(Architecture::RiscV64),
            other => Err(BundleError::UnknownArchitecture(other.to_string())),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "x64" | "x86_64" | "amd64" => Ok(Architecture::X64),
            "arm" => Ok(Architecture::Arm),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            "wasm" => Ok(Architecture::Wasm),
            "s390x" => Ok(Architecture::S390x),
            "loongarch64" => Ok(Architecture::LoongArch64),
            "armv6" => Ok(Architecture::Armv6),
            "ppc64le" => Ok(Architecture::Ppc64le),
            "riscv64" => Ok(Architecture::RiscV64),
            _ => Err(BundleError::UnknownArchitecture(s.to_string())),
        }
    }
}

impl TryFrom<String> for Architecture {
    type Error = BundleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Architecture> for String {
    fn from(arch: Architecture) -> String {
        arch.as_str().to_string()
    }
}

/// An (OS, architecture) pair, usually parsed from a runtime identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Architecture,
}

impl Platform {
    pub fn new(os: Os, arch: Architecture) -> Self {
        Self { os, arch }
    }

    /// Parse a runtime identifier such as `linux-x64`, `win10-arm64`,
    /// `osx.12-arm64` or `linux-musl-x64`.
    ///
    /// The first segment names the OS (an OS version suffix is ignored), the
    /// last segment names the architecture, and anything in between
    /// (libc flavor, distro) is ignored.
    pub fn from_rid(rid: &str) -> Result<Self> {
        let segments: Vec<&str> = rid.trim().split('-').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return Err(BundleError::InvalidRid(rid.to_string()));
        }

        let os_token = segments[0].split('.').next().unwrap_or_default();
        let os_token = os_token.trim_end_matches(|c: char| c.is_ascii_digit());
        let os = os_token.parse()?;
        let arch = segments[segments.len() - 1].parse()?;

        Ok(Self { os, arch })
    }

    pub fn rid(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// The machine and framework the tool runs on.
///
/// Detected once by the top-level caller and passed to
/// [`TargetInfo::resolve`](crate::TargetInfo::resolve) to fill in whatever the
/// caller left unspecified. Tests construct it directly with any values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: Os,
    pub arch: Architecture,
    pub framework: FrameworkVersion,
}

impl HostPlatform {
    pub fn new(os: Os, arch: Architecture, framework: FrameworkVersion) -> Self {
        Self { os, arch, framework }
    }

    /// Detect the current process's platform.
    ///
    /// Fails on hosts outside the known OS/architecture set rather than
    /// guessing one.
    pub fn detect() -> Result<Self> {
        let os = Os::from_rust_os(std::env::consts::OS)?;
        let arch = Architecture::from_rust_arch(std::env::consts::ARCH)?;
        Ok(Self {
            os,
            arch,
            framework: FrameworkVersion::current(),
        })
    }

    pub fn platform(&self) -> Platform {
        Platform::new(self.os, self.arch)
    }
}
