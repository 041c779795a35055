//! CLI presentation: text and json formatters for run progress and results.

use crate::diagnostics::Diagnostic;
use crate::error::ConfiguratorError;
use crate::run::{Applied, Plan, RunOutcome};
use crate::substitute::Replacement;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

pub fn format_banner() -> String {
    format!("Configurator version: {}", env!("CARGO_PKG_VERSION"))
}

pub fn format_search_root(root: &Path) -> String {
    format!("Searching in: {}", root.display())
}

pub fn format_untemplated(path: &Path) -> String {
    format!(
        "File '{}' could be a template file but contains no substitutable variables",
        path.display()
    )
}

pub fn format_template_choice(plan: &Plan) -> String {
    format!("Using template file: {}", plan.template.display())
}

pub fn format_loading(path: &Path) -> String {
    format!("Loading value file {}", path.display())
}

pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    let lines: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
    Some(format!("\n{}\n", lines.join("\n")))
}

pub fn format_populating(plan: &Plan, applied: &Applied) -> String {
    format!(
        "Populating [{}] with values from [{}]",
        plan.template.display(),
        applied.title
    )
}

pub fn format_replacement(replacement: &Replacement) -> String {
    format!(
        "Replace '{}' with '{}' on line {}",
        replacement.placeholder, replacement.value, replacement.line
    )
}

/// Closing line: whether the template changed on disk.
pub fn format_done(applied: &Applied) -> String {
    if applied.written {
        format!("{}", "Done".green())
    } else {
        format!(
            "{} ({} replacement(s); preview only, nothing written)",
            "Done".green(),
            applied.replacements.len()
        )
    }
}

/// Numbered candidate list shown before an interactive choice.
pub fn format_candidates_table(heading: &str, candidates: &[PathBuf]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", heading]);
    for (i, path) in candidates.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), path.display().to_string()]);
    }
    format!("{}", table)
}

pub fn format_outcome_json(outcome: &RunOutcome) -> Result<String, ConfiguratorError> {
    serde_json::to_string_pretty(outcome)
        .map_err(|e| ConfiguratorError::Config(format!("Failed to serialize outcome: {}", e)))
}

pub fn format_error_json(error: &ConfiguratorError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}
