//! `hostpack info` — Display environment info.

use std::path::Path;

use hostpack_bundle::config::{ENV_ARCH, ENV_FRAMEWORK, ENV_OS};
use hostpack_bundle::{HostPlatform, CONFIG_FILE_NAME};

use crate::LOG_ENV;

pub fn execute() -> anyhow::Result<()> {
    println!("Hostpack v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match HostPlatform::detect() {
        Ok(host) => {
            println!("Host:         {}", host.platform());
            println!("Framework:    {}", host.framework);
        }
        Err(err) => println!("Host:         unsupported ({})", err),
    }

    if Path::new(CONFIG_FILE_NAME).is_file() {
        println!("Config:       {}", CONFIG_FILE_NAME);
    }

    println!();
    println!("Environment:");
    for var in [ENV_OS, ENV_ARCH, ENV_FRAMEWORK, LOG_ENV] {
        print_env(var);
    }

    Ok(())
}

fn print_env(var: &str) {
    match std::env::var(var) {
        Ok(val) => println!("  {} = {}", var, val),
        Err(_) => println!("  {} = (default)", var),
    }
}
