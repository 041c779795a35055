//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and destination
//! come from (highest first) `CONFIGURATOR_LOG*` environment variables, CLI
//! flags, the config file, then defaults. Logs go to stderr by default so they
//! never mix with the run report printed on stdout.

use crate::error::ConfiguratorError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable all log output when false
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"; defaults to the platform data dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal stream only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stderr,
    Stdout,
    File,
}

/// Default log file: `<platform data dir>/configurator/configurator.log`.
pub fn default_log_file_path() -> Result<PathBuf, ConfiguratorError> {
    ProjectDirs::from("", "", "configurator")
        .map(|dirs| dirs.data_dir().join("configurator.log"))
        .ok_or_else(|| {
            ConfiguratorError::Config("Unable to determine a data directory for logs".to_string())
        })
}

/// Initialize the logging system. Call once, before the run starts.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ConfiguratorError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let base_subscriber = Registry::default().with(filter);
    let json = format == "json";

    match output {
        Output::File => {
            let log_file = match &config.file {
                Some(path) => path.clone(),
                None => default_log_file_path()?,
            };
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ConfiguratorError::io(parent, e))?;
            }
            let writer = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .map_err(|e| ConfiguratorError::io(&log_file, e))?;
            if json {
                base_subscriber
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_writer(writer),
                    )
                    .init();
            } else {
                base_subscriber
                    .with(
                        fmt::layer()
                            .with_target(true)
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(writer),
                    )
                    .init();
            }
        }
        Output::Stdout if json => {
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        Output::Stdout => {
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        Output::Stderr if json => {
            base_subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Output::Stderr => {
            base_subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}

/// Build environment filter from `CONFIGURATOR_LOG` or the configured level
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ConfiguratorError> {
    if let Ok(filter) = EnvFilter::try_from_env("CONFIGURATOR_LOG") {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level).map_err(|e| {
        ConfiguratorError::Config(format!("Invalid log level '{}': {}", config.level, e))
    })
}

/// Determine output format from environment or config
fn determine_format(config: &LoggingConfig) -> Result<String, ConfiguratorError> {
    if let Ok(format) = std::env::var("CONFIGURATOR_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(ConfiguratorError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

/// Determine output destination from environment or config
fn determine_output(config: &LoggingConfig) -> Result<Output, ConfiguratorError> {
    if let Ok(output) = std::env::var("CONFIGURATOR_LOG_OUTPUT") {
        return parse_output(&output);
    }
    parse_output(&config.output)
}

fn parse_output(output: &str) -> Result<Output, ConfiguratorError> {
    match output {
        "stderr" => Ok(Output::Stderr),
        "stdout" => Ok(Output::Stdout),
        "file" => Ok(Output::File),
        _ => Err(ConfiguratorError::Config(format!(
            "Invalid log output: {} (must be 'stderr', 'stdout' or 'file')",
            output
        ))),
    }
}
