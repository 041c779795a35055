//! CLI parse: clap types for the configurator. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Configurator - fill templated config files with per-environment values
#[derive(Parser, Debug)]
#[command(name = "configurator", version)]
#[command(about = "Automatically fill out templated config files")]
pub struct Cli {
    /// Directory to search recursively for template and value files
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Environment whose values to apply (defaults to the configured default, 'dev')
    #[arg(short = 'e', long = "env")]
    pub env: Option<String>,

    /// Template file to populate (any file with template variables)
    #[arg(short = 't', long = "template")]
    pub template: Option<PathBuf>,

    /// Apply only the requested environment instead of the whole hierarchy
    #[arg(short = 's', long = "single-env")]
    pub single_env: bool,

    /// Pick the template and value files from the discovered options
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Print redundant value specifications and every replacement
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print what would be replaced without writing the template
    #[arg(short = 'w', long = "whatif", visible_alias = "dry-run")]
    pub whatif: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
