//! CLI domain: parse, route, prompt, output, and presentation only.
//! No engine logic; the route drives `run::Configurator` stage by stage.

mod output;
mod parse;
mod presentation;
mod prompt;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use presentation::{format_candidates_table, format_error_json, format_outcome_json};
pub use prompt::TerminalSelector;
pub use route::{load_config, RunContext};
