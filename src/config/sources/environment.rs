//! Environment variable source: `CONFIGURATOR__SECTION__KEY=value`.
//!
//! List keys accept comma separated values, e.g.
//! `CONFIGURATOR__ENVIRONMENTS__ORDER=dev,staging,prod`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "CONFIGURATOR";

const LIST_KEYS: &[&str] = &[
    "discovery.template_names",
    "discovery.ignored_dirs",
    "environments.order",
];

/// Add environment overrides on top of every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    let mut source = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .try_parsing(true);
    for key in LIST_KEYS {
        source = source.with_list_parse_key(key);
    }
    builder.add_source(source)
}
