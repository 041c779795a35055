//! Interactive selection on the terminal via dialoguer.

use crate::cli::presentation::format_candidates_table;
use crate::error::ConfiguratorError;
use crate::run::{parse_index_list, Selector};
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// Prompts on stderr, so stdout keeps only the run report.
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select_template(&mut self, candidates: &[PathBuf]) -> Result<usize, ConfiguratorError> {
        let items: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Select::new()
            .with_prompt("Select the template file to use")
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| ConfiguratorError::Prompt(e.to_string()))
    }

    fn select_value_files(
        &mut self,
        candidates: &[PathBuf],
    ) -> Result<Vec<usize>, ConfiguratorError> {
        eprintln!("{}", format_candidates_table("Value file", candidates));

        let len = candidates.len();
        let answer: String = Input::new()
            .with_prompt(
                "Select the value file to use (use a comma-separated list of indices to select multiple files)",
            )
            .validate_with(|input: &String| -> Result<(), String> {
                parse_index_list(input, len)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| ConfiguratorError::Prompt(e.to_string()))?;

        parse_index_list(&answer, len)
    }
}
