//! Path classification: template files, value files, or neither.

use crate::error::ConfiguratorError;
use serde::Serialize;
use std::path::Path;

/// Minimum `%` count for a file to possibly hold a placeholder.
const MIN_PERCENT_SIGNS: usize = 2;

/// Result of looking at a path as a potential template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    /// Name does not match any recognized template name.
    None,
    /// Recognized name, but fewer than two `%` characters in the content.
    NoVariables,
    /// Recognized name with substitutable content.
    Template,
}

/// Whether content could hold at least one `%KEY%` placeholder. Counts raw
/// bytes, so the encoding of the file does not matter.
pub fn has_template_variables(content: impl AsRef<[u8]>) -> bool {
    content
        .as_ref()
        .iter()
        .filter(|&&b| b == b'%')
        .take(MIN_PERCENT_SIGNS)
        .count()
        >= MIN_PERCENT_SIGNS
}

/// Read a file and apply [`has_template_variables`] to it. Used for an
/// explicitly supplied template, whatever its name.
pub fn contains_template_variables(path: &Path) -> Result<bool, ConfiguratorError> {
    let content = std::fs::read(path).map_err(|e| ConfiguratorError::io(path, e))?;
    Ok(has_template_variables(content))
}

fn base_name_lower(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_lowercase())
}

/// Classifies paths against a set of recognized template file names.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Lowercased template names, e.g. `app.config`
    template_names: Vec<String>,
}

impl Classifier {
    pub fn new<I, S>(template_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            template_names: template_names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Base name equals a recognized template name (case-insensitive).
    pub fn has_template_name(&self, path: &Path) -> bool {
        base_name_lower(path).is_some_and(|name| self.template_names.iter().any(|t| *t == name))
    }

    /// Classify a path as a template. Only files with a template name are read.
    pub fn classify_template(&self, path: &Path) -> Result<TemplateStatus, ConfiguratorError> {
        if !self.has_template_name(path) {
            return Ok(TemplateStatus::None);
        }
        if contains_template_variables(path)? {
            Ok(TemplateStatus::Template)
        } else {
            Ok(TemplateStatus::NoVariables)
        }
    }

    /// Base name ends with `.` plus a recognized template name (case-insensitive),
    /// e.g. `prod.app.config`. A bare `app.config` is not a value file.
    pub fn is_value_file(&self, path: &Path) -> bool {
        let Some(name) = base_name_lower(path) else {
            return false;
        };
        self.template_names.iter().any(|t| {
            name.len() > t.len()
                && name.ends_with(t.as_str())
                && name.as_bytes()[name.len() - t.len() - 1] == b'.'
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TEMPLATE_NAMES)
    }
}
