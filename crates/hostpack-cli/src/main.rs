//! Hostpack CLI
//!
//! Inspection tool for single-file bundle targets: shows the resolved
//! packaging policy and classifies candidate files as native images.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::TargetArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HOSTPACK_LOG";

#[derive(Parser)]
#[command(name = "hostpack")]
#[command(about = "Single-file bundle target inspection", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bundle policy for a target
    Target {
        #[command(flatten)]
        target: TargetArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify files as native, other, or excluded for a target
    Classify {
        /// Files or directories to classify
        #[arg(required = true)]
        paths: Vec<String>,
        #[command(flatten)]
        target: TargetArgs,
        /// Worker threads (defaults to the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Color output: auto, always, never
        #[arg(long, default_value = "auto")]
        color: String,
    },

    /// Show host platform and environment
    Info,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Target { target, json } => commands::target::execute(target, json),
        Commands::Classify {
            paths,
            target,
            jobs,
            color,
        } => commands::classify::execute(paths, target, jobs, &color),
        Commands::Info => commands::info::execute(),
    }
}
