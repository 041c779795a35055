//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ConfiguratorError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ConfiguratorError) -> String {
    match e {
        ConfiguratorError::Config(_) => format!("{}\nCheck .configurator.toml or --config.", e),
        _ => e.to_string(),
    }
}
