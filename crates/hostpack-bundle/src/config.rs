//! Target configuration (hostpack.toml)
//!
//! ```toml
//! [target]
//! rid = "linux-arm64"       # or: os = "linux", arch = "arm64"
//! framework = "net8.0"
//! ```
//!
//! Values are layered: config file, then `HOSTPACK_*` environment
//! variables, then whatever the caller sets explicitly. Anything still
//! unset falls back to the host platform at resolution time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::platform::{Architecture, HostPlatform, Os, Platform};
use crate::target::TargetInfo;
use crate::version::FrameworkVersion;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hostpack.toml";

pub const ENV_OS: &str = "HOSTPACK_OS";
pub const ENV_ARCH: &str = "HOSTPACK_ARCH";
pub const ENV_FRAMEWORK: &str = "HOSTPACK_FRAMEWORK";

/// Top-level config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostpackConfig {
    #[serde(default)]
    pub target: TargetConfig,
}

/// Partially specified target.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Os>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<Architecture>,

    /// Runtime identifier; supplies `os` and `arch` where those are unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkVersion>,
}

impl HostpackConfig {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if given, else `hostpack.toml` in `dir` if present, else
    /// defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

impl TargetConfig {
    /// Override fields from `HOSTPACK_OS`, `HOSTPACK_ARCH` and
    /// `HOSTPACK_FRAMEWORK`.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup.
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(os) = lookup(ENV_OS).filter(|v| !v.is_empty()) {
            self.os = Some(os.parse()?);
        }
        if let Some(arch) = lookup(ENV_ARCH).filter(|v| !v.is_empty()) {
            self.arch = Some(arch.parse()?);
        }
        if let Some(framework) = lookup(ENV_FRAMEWORK).filter(|v| !v.is_empty()) {
            self.framework = Some(framework.parse()?);
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(mut self, other: TargetConfig) -> Self {
        // A rid on top replaces os/arch from below so the layers do not mix.
        if other.rid.is_some() {
            self.os = None;
            self.arch = None;
            self.rid = other.rid;
        }
        self.os = other.os.or(self.os);
        self.arch = other.arch.or(self.arch);
        self.framework = other.framework.or(self.framework);
        self
    }

    /// Explicit os/arch, with the rid filling the gaps.
    pub fn platform_parts(&self) -> Result<(Option<Os>, Option<Architecture>)> {
        let from_rid = match &self.rid {
            Some(rid) => Some(Platform::from_rid(rid)?),
            None => None,
        };
        Ok((
            self.os.or(from_rid.map(|p| p.os)),
            self.arch.or(from_rid.map(|p| p.arch)),
        ))
    }

    /// Resolve against `host`.
    pub fn resolve(&self, host: &HostPlatform) -> Result<TargetInfo> {
        let (os, arch) = self.platform_parts()?;
        TargetInfo::resolve(host, os, arch, self.framework.clone())
    }

    /// Resolve, calling `host` only if some field is still unset.
    pub fn resolve_with<F>(&self, host: F) -> Result<TargetInfo>
    where
        F: FnOnce() -> Result<HostPlatform>,
    {
        match (self.platform_parts()?, &self.framework) {
            ((Some(os), Some(arch)), Some(framework)) => {
                TargetInfo::new(os, arch, framework.clone())
            }
            ((os, arch), framework) => {
                TargetInfo::resolve(&host()?, os, arch, framework.clone())
            }
        }
    }
}
