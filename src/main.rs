//! Magazine Store reconciler CLI
//!
//! Runs reconciliation passes against the Magazine Store service and prints
//! the subscribers who read every category.

use std::process;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use magazine_store::cli::{handle_config, handle_run, Cli, Commands};
use magazine_store::constants::env as env_constants;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    init_logging(&cli);

    info!("Magazine Store reconciler v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run(args) => handle_run(&cli.global, args)
            .await
            .context("Reconciliation failed"),
        Commands::Config(args) => handle_config(&cli.global, args)
            .await
            .context("Configuration command failed"),
    }
}

/// Initialize logging
///
/// An explicit CLI verbosity flag wins; otherwise `MAGSTORE_LOG`, then
/// `RUST_LOG`, then warnings only.
fn init_logging(cli: &Cli) {
    let filter = match cli.log_level() {
        Some(level) => EnvFilter::new(format!("magazine_store={}", level)),
        None => EnvFilter::try_from_env(env_constants::LOG)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("magazine_store=warn")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
