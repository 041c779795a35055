//! Error types for the configurator.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every failure a run can end with. All of them abort the run before the
/// template is written.
#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("No valid template files (with the default naming scheme) found under {0}")]
    NoTemplatesFound(PathBuf),

    #[error("No value files found under {0}")]
    NoValueFilesFound(PathBuf),

    #[error("Invalid template file '{path}': {reason}")]
    InvalidExplicitTemplate { path: PathBuf, reason: String },

    #[error(
        "No template file specified and multiple templates available ({}). Try again in interactive mode.",
        join_paths(.candidates)
    )]
    AmbiguousTemplateSelection { candidates: Vec<PathBuf> },

    #[error("No value file for environment '{environment}' found")]
    NoMatchingEnvironment { environment: String },

    #[error(
        "Multiple matching value files were found ({}) for environment {environment}. Try again in interactive mode.",
        join_paths(.matches)
    )]
    AmbiguousEnvironment {
        environment: String,
        matches: Vec<PathBuf>,
    },

    #[error("{path}:{line_number}: expected 'key=value', got '{line}'")]
    ValueFileParse {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),
}

impl ConfiguratorError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ConfiguratorError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<config::ConfigError> for ConfiguratorError {
    fn from(err: config::ConfigError) -> Self {
        ConfiguratorError::Config(err.to_string())
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
