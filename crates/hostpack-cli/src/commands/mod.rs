pub mod classify;
pub mod info;
pub mod target;

use std::path::{Path, PathBuf};

use clap::Args;
use hostpack_bundle::{
    Architecture, FrameworkVersion, HostPlatform, HostpackConfig, Os, TargetConfig, TargetInfo,
};

/// Target selection flags shared by every command that resolves a target.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target operating system (win, linux, osx, freebsd, illumos)
    #[arg(long)]
    pub os: Option<Os>,
    /// Target architecture (x64, x86, arm64, loongarch64, ...)
    #[arg(long)]
    pub arch: Option<Architecture>,
    /// Runtime identifier, e.g. linux-x64 (overrides --os/--arch from config)
    #[arg(long)]
    pub rid: Option<String>,
    /// Target framework version, e.g. 8.0 or net8.0
    #[arg(short, long)]
    pub framework: Option<FrameworkVersion>,
    /// Config file (defaults to ./hostpack.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    fn as_overrides(&self) -> TargetConfig {
        TargetConfig {
            os: self.os,
            arch: self.arch,
            rid: self.rid.clone(),
            framework: self.framework.clone(),
        }
    }

    /// Layer config file, environment, then flags. The host is detected
    /// only if a field is left unset.
    pub fn resolve(&self, dir: &Path) -> anyhow::Result<TargetInfo> {
        let mut target = HostpackConfig::discover(self.config.as_deref(), dir)?.target;
        target.apply_env()?;
        let target = target.merge(self.as_overrides());
        Ok(target.resolve_with(HostPlatform::detect)?)
    }
}
