//! Merge rules: built-in defaults at the bottom of every config stack.

use crate::config::{DEFAULT_ENVIRONMENTS, DEFAULT_IGNORED_DIRS, DEFAULT_TEMPLATE_NAMES};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("discovery.template_names", DEFAULT_TEMPLATE_NAMES.to_vec())?
        .set_default("discovery.ignored_dirs", DEFAULT_IGNORED_DIRS.to_vec())?
        .set_default("environments.order", DEFAULT_ENVIRONMENTS.to_vec())?
        .set_default("environments.default", DEFAULT_ENVIRONMENTS[0])
}
