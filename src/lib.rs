//! Configurator: templated config files filled per environment
//!
//! Finds template files (`app.config`, `web.config`, `appsettings.json`) and
//! value files (`dev.app.config`, ...) under a directory, resolves the value
//! files nearest to the template into an environment chain, merges them and
//! substitutes `%KEY%` / `%%KEY%%` placeholders.

pub mod classify;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod logging;
pub mod proximity;
pub mod run;
pub mod substitute;
pub mod tree;
pub mod values;
