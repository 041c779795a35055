//! Workspace config file source: `<search root>/.configurator.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

/// File name looked up in the search root.
pub const WORKSPACE_CONFIG_FILE: &str = ".configurator.toml";

/// Add the workspace config file to builder. It overrides the global file.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if !path.is_file() {
        return Ok(builder);
    }

    debug!(config_path = %path.display(), "Loading workspace configuration");
    Ok(builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false)))
}
