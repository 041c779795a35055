//! Configurator CLI Binary
//!
//! Fills a templated config file with the values of the requested environment.
//! Exits with status 1 on any failure.

use clap::Parser;
use configurator::cli::{format_error_json, load_config, map_error, Cli, RunContext};
use configurator::config::ConfiguratorConfig;
use configurator::logging::{init_logging, LoggingConfig};
use owo_colors::OwoColorize;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // A broken config file still gets reported through the normal error path
    // below; logging falls back to defaults until then.
    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, config.as_ref().ok());

    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Configurator starting");

    let result = config.and_then(|config| {
        let context = RunContext::with_config(&cli, &config);
        let mut stdout = std::io::stdout().lock();
        context.execute(&mut stdout)
    });

    match result {
        Ok(_) => info!("Run completed successfully"),
        Err(e) => {
            error!("Run failed: {}", e);
            if cli.format == "json" {
                println!("{}", format_error_json(&e));
            } else {
                eprintln!("{}", map_error(&e).red());
            }
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: Option<&ConfiguratorConfig>) -> LoggingConfig {
    let mut logging = config.map(|c| c.logging.clone()).unwrap_or_default();

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
