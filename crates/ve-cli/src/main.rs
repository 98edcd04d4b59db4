//! ve-setup
//!
//! Installs virtualenv on demand, creates the requested environment with it
//! and activates it.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use ve_bootstrap::{BootstrapConfig, BootstrapOptions, EnvironmentContext};

use cli::Cli;
use error::{CliError, Result};

/// Variable holding the log filter, e.g. `VE_SETUP_LOG=debug`
const LOG_ENV: &str = "VE_SETUP_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        report(&e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let options = BootstrapOptions {
        version: cli.version,
        activate: true,
    };
    let manager = ve_bootstrap::use_virtualenv(&cli.args, &options)?;
    tracing::debug!(
        root = %manager.descriptor().root().display(),
        python = %manager.interpreter().display(),
        virtualenv = %manager.config().virtualenv_version,
        "done"
    );
    Ok(())
}

fn report(error: &CliError) {
    if debug_requested() {
        let chain = error.chain();
        eprintln!("{}: {}", "error".red().bold(), chain[0]);
        for cause in &chain[1..] {
            eprintln!("  {}: {}", "caused by".yellow(), cause);
        }
    } else {
        eprintln!("{}: {}", "error".red().bold(), error);
    }
}

/// Whether configuration asks for full error chains.
fn debug_requested() -> bool {
    let Ok(cwd) = std::env::current_dir() else {
        return false;
    };
    BootstrapConfig::load(&cwd, &EnvironmentContext::from_process())
        .map(|config| config.debug)
        .unwrap_or(false)
}
