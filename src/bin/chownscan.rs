//! chownscan CLI Binary
//!
//! Command-line interface for reporting files that need an ownership change.

use chownscan::cli::{is_broken_pipe, map_error, Cli, RunContext};
use chownscan::config::ChownscanConfig;
use chownscan::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let context = match RunContext::new(cli.config.clone(), &cwd) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, context.config());
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("chownscan starting");

    let stdout = std::io::stdout();
    match context.execute(&cli.command, stdout.lock()) {
        Ok(()) => info!("Command completed successfully"),
        Err(e) if is_broken_pipe(&e) => debug!("Stdout closed by reader"),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &ChownscanConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
