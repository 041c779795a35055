//! ConfigLoader: the single entry point for building a `ConfiguratorConfig`.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::ConfiguratorConfig;
use crate::error::ConfiguratorError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Loads configuration from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a search root.
    ///
    /// Precedence (highest last): defaults, global file, `<root>/.configurator.toml`,
    /// `CONFIGURATOR__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<ConfiguratorConfig, ConfiguratorError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: ConfiguratorConfig = builder.build()?.try_deserialize()?;
        debug!(
            templates = ?config.discovery.template_names,
            environments = ?config.environments.order,
            "Configuration loaded"
        );
        Self::validated(config)
    }

    /// Load configuration from one explicit file over the built-in defaults.
    pub fn load_from_file(path: &Path) -> Result<ConfiguratorConfig, ConfiguratorError> {
        if !path.is_file() {
            return Err(ConfiguratorError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config: ConfiguratorConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: ConfiguratorConfig) -> Result<ConfiguratorConfig, ConfiguratorError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfiguratorError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
