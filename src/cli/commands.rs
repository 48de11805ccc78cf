//! Command handlers for the Magazine Store CLI
//!
//! This module connects parsed arguments to the configuration layer and the
//! reconciliation pipeline, and owns all console output.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use crate::app::{PassResult, Reconciler};
use crate::cli::output::render_pass;
use crate::cli::prompt::{wait_for_rerun, RerunChoice};
use crate::cli::{ConfigAction, ConfigArgs, GlobalArgs, RunArgs};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the run command
///
/// Runs one pass, prints its report, and unless `--once` was given (or stdin
/// is not a terminal) offers to rerun. In interactive mode a failed pass is
/// reported and the prompt is still offered.
pub async fn handle_run(global: &GlobalArgs, args: RunArgs) -> Result<()> {
    let mut config = AppConfig::load(global.config.clone()).await?;
    if let Some(base_url) = args.base_url.clone() {
        info!("Base URL overridden on the command line");
        config.api.base_url = base_url;
    }

    let reconciler = Reconciler::new(config.to_runtime_config()?)?;
    let interactive = !args.once && atty::is(atty::Stream::Stdin);

    println!("----------------PROCESS STARTED------------------");
    loop {
        match run_with_spinner(&reconciler, global.quiet).await {
            Ok(pass) => {
                print!("{}", render_pass(&pass));
                println!("End of Process.");
            }
            Err(e) if interactive => {
                error!("Pass failed ({}): {}", e.category(), e);
                eprintln!("Pass failed: {}", e);
            }
            Err(e) => return Err(e),
        }

        if !interactive {
            break;
        }
        if wait_for_rerun().await? == RerunChoice::Quit {
            break;
        }
    }
    println!("------------------PROCESS ENDS--------------------------");

    Ok(())
}

/// Run a pass with a spinner on stderr when it is a terminal
async fn run_with_spinner(reconciler: &Reconciler, quiet: bool) -> Result<PassResult> {
    let spinner = if !quiet && atty::is(atty::Stream::Stderr) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style.tick_strings(&["◐", "◓", "◑", "◒"]));
        }
        spinner.set_message("Reconciling subscriptions...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    } else {
        None
    };

    let result = reconciler.run_pass().await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result
}

/// Handle configuration management commands
pub async fn handle_config(global: &GlobalArgs, args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => AppConfig::default_config_path()?,
            };
            AppConfig::write_default(&path, force).await?;
            println!("Created configuration file: {}", path.display());
        }
        ConfigAction::Show => {
            let config = AppConfig::load(global.config.clone()).await?;
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
