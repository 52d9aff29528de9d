//! Leap - query node chain info and service health
//!
//! Main entry point for the Leap CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{health, info};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Leap - query node chain info and service health
#[derive(Parser)]
#[command(name = "leap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Node API base URL
    #[arg(
        long,
        global = true,
        env = "LEAP_API_URL",
        default_value = "http://127.0.0.1:8888"
    )]
    pub url: String,

    /// Host header to send instead of the hostname taken from --url
    #[arg(long, global = true, env = "LEAP_API_HOST")]
    pub host: Option<String>,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, global = true, env = "LEAP_API_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show chain info from /v1/chain/get_info
    Info(info::InfoArgs),

    /// Show service health from /v2/health
    Health(health::HealthArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "leap=debug,leap_client=debug,warn"
    } else {
        "leap=info,leap_client=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let ctx = commands::Context {
        url: cli.url,
        host: cli.host,
        timeout: cli.timeout,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Info(args) => info::run(args, &ctx).await,
        Commands::Health(args) => health::run(args, &ctx).await,
    }
}
