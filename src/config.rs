//! Configuration System
//!
//! Layered settings for discovery (template names, pruned directories),
//! environment ordering and logging. Built-in defaults sit at the bottom, then
//! the global config file, the workspace file and finally `CONFIGURATOR__*`
//! environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Recognized template file names. A value file is `<prefix>.<one of these>`.
pub const DEFAULT_TEMPLATE_NAMES: &[&str] = &["app.config", "web.config", "appsettings.json"];

/// Environments, most specific first.
pub const DEFAULT_ENVIRONMENTS: &[&str] = &["dev", "qa", "prod"];

/// Directory names pruned from discovery: version control, build output,
/// package caches and IDE state.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "Debug", "Release", "obj", "packages", ".vs", ".idea"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguratorConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub environments: EnvironmentConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What counts as a template and which directories are never entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default = "default_template_names")]
    pub template_names: Vec<String>,

    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
}

/// Environment tiers and the one used when none is requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Most specific first; this order is the override precedence.
    #[serde(default = "default_environment_order")]
    pub order: Vec<String>,

    #[serde(default = "default_environment")]
    pub default: String,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_template_names() -> Vec<String> {
    to_strings(DEFAULT_TEMPLATE_NAMES)
}

fn default_ignored_dirs() -> Vec<String> {
    to_strings(DEFAULT_IGNORED_DIRS)
}

fn default_environment_order() -> Vec<String> {
    to_strings(DEFAULT_ENVIRONMENTS)
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENTS[0].to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            template_names: default_template_names(),
            ignored_dirs: default_ignored_dirs(),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            order: default_environment_order(),
            default: default_environment(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Discovery(String),
    Environments(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Discovery(msg) => write!(f, "Discovery: {}", msg),
            ValidationError::Environments(msg) => write!(f, "Environments: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DiscoveryConfig {
    fn validate(&self, errors: &mut Vec<ValidationError>) {
        if self.template_names.is_empty() {
            errors.push(ValidationError::Discovery(
                "at least one template name is required".to_string(),
            ));
        }
        for name in &self.template_names {
            if name.trim().is_empty() {
                errors.push(ValidationError::Discovery(
                    "template names cannot be empty".to_string(),
                ));
            } else if name.contains('/') || name.contains('\\') {
                errors.push(ValidationError::Discovery(format!(
                    "template name '{}' must be a file name, not a path",
                    name
                )));
            }
        }
    }
}

impl EnvironmentConfig {
    fn validate(&self, errors: &mut Vec<ValidationError>) {
        if self.order.is_empty() {
            errors.push(ValidationError::Environments(
                "at least one environment is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for env in &self.order {
            if env.is_empty() {
                errors.push(ValidationError::Environments(
                    "environment names cannot be empty".to_string(),
                ));
            } else if !seen.insert(env.as_str()) {
                errors.push(ValidationError::Environments(format!(
                    "environment '{}' is listed more than once",
                    env
                )));
            }
        }
        if self.default.is_empty() {
            errors.push(ValidationError::Environments(
                "default environment cannot be empty".to_string(),
            ));
        }
    }
}

impl ConfiguratorConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        self.discovery.validate(&mut errors);
        self.environments.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
