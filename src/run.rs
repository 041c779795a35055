//! Run orchestration: discovery, template choice, chain resolution, merge and
//! the final write.
//!
//! Stages are exposed separately so a front end can report between them;
//! [`Configurator::run`] chains them for callers that only want the outcome.

use crate::classify::{contains_template_variables, Classifier, TemplateStatus};
use crate::config::ConfiguratorConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::environment::{resolve_chain, ChainRequest, Environments};
use crate::error::ConfiguratorError;
use crate::proximity::nearest;
use crate::substitute::{self, Replacement};
use crate::tree::walker::{Walker, WalkerConfig};
use crate::values::{load_value_file, merge_value_mappings, ValueMapping};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Interactive choices, supplied by the front end.
pub trait Selector {
    /// Index into `candidates` of the template to populate.
    fn select_template(&mut self, candidates: &[PathBuf]) -> Result<usize, ConfiguratorError>;

    /// Indices into `candidates` of the value files to apply, in order.
    fn select_value_files(
        &mut self,
        candidates: &[PathBuf],
    ) -> Result<Vec<usize>, ConfiguratorError>;
}

/// Parse a comma separated list of 1-based indices into 0-based ones.
pub fn parse_index_list(input: &str, len: usize) -> Result<Vec<usize>, ConfiguratorError> {
    input
        .split(',')
        .map(|part| parse_index(part, len))
        .collect()
}

/// Parse one 1-based index into a 0-based one.
pub fn parse_index(input: &str, len: usize) -> Result<usize, ConfiguratorError> {
    let part = input.trim();
    let n: usize = part
        .parse()
        .map_err(|_| ConfiguratorError::InvalidSelection(format!("'{}' is not a number", part)))?;
    if n == 0 || n > len {
        return Err(ConfiguratorError::InvalidSelection(format!(
            "{} is out of range (1-{})",
            n, len
        )));
    }
    Ok(n - 1)
}

/// What one run should do.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub root: PathBuf,
    pub environment: String,
    pub single_env: bool,
    /// Explicit template; its name does not need to be recognized.
    pub template: Option<PathBuf>,
    /// Compute and report, never write.
    pub preview: bool,
    pub verbose: bool,
}

/// Files found under the search root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    /// Recognized template names with substitutable content
    pub templates: Vec<PathBuf>,
    /// Recognized template names without any variables; skipped
    pub untemplated: Vec<PathBuf>,
    pub value_files: Vec<PathBuf>,
}

/// The template to populate and the value files to merge into it.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub template: PathBuf,
    pub chain: Vec<PathBuf>,
}

/// Result of applying a plan.
#[derive(Debug, Clone, Serialize)]
pub struct Applied {
    pub title: String,
    pub replacements: Vec<Replacement>,
    pub diagnostics: Vec<Diagnostic>,
    pub written: bool,
}

/// Everything a front end reports after a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub discovery: Discovery,
    pub plan: Plan,
    pub applied: Applied,
}

/// The configured engine.
#[derive(Debug, Clone)]
pub struct Configurator {
    classifier: Classifier,
    environments: Environments,
    walker: WalkerConfig,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::from_config(&ConfiguratorConfig::default())
    }
}

impl Configurator {
    pub fn from_config(config: &ConfiguratorConfig) -> Self {
        Self {
            classifier: Classifier::new(&config.discovery.template_names),
            environments: Environments::new(config.environments.order.iter().cloned()),
            walker: WalkerConfig {
                ignored_dirs: config.discovery.ignored_dirs.clone(),
            },
        }
    }

    /// Walk `root` and classify every file.
    pub fn discover(&self, root: &Path) -> Result<Discovery, ConfiguratorError> {
        let files = Walker::with_config(root.to_path_buf(), self.walker.clone()).files()?;

        let mut discovery = Discovery::default();
        for path in files {
            if self.classifier.is_value_file(&path) {
                discovery.value_files.push(path.clone());
            }
            match self.classifier.classify_template(&path)? {
                TemplateStatus::Template => discovery.templates.push(path),
                TemplateStatus::NoVariables => discovery.untemplated.push(path),
                TemplateStatus::None => {}
            }
        }

        info!(
            root = %root.display(),
            templates = discovery.templates.len(),
            value_files = discovery.value_files.len(),
            "Discovery complete"
        );
        Ok(discovery)
    }

    /// Choose the template and the value-file chain.
    ///
    /// With a selector (interactive mode) the user picks the value files from
    /// the full list; otherwise the nearest files are resolved by environment.
    pub fn plan(
        &self,
        discovery: &Discovery,
        request: &RunRequest,
        mut selector: Option<&mut dyn Selector>,
    ) -> Result<Plan, ConfiguratorError> {
        if discovery.templates.is_empty() && request.template.is_none() {
            return Err(ConfiguratorError::NoTemplatesFound(request.root.clone()));
        }
        if discovery.value_files.is_empty() {
            return Err(ConfiguratorError::NoValueFilesFound(request.root.clone()));
        }

        let template = match &request.template {
            Some(explicit) => validate_explicit_template(explicit)?,
            None if discovery.templates.len() == 1 => discovery.templates[0].clone(),
            None => match selector.as_deref_mut() {
                Some(selector) => {
                    let index = selector.select_template(&discovery.templates)?;
                    discovery.templates.get(index).cloned().ok_or_else(|| {
                        ConfiguratorError::InvalidSelection(format!(
                            "template index {} is out of range",
                            index + 1
                        ))
                    })?
                }
                None => {
                    return Err(ConfiguratorError::AmbiguousTemplateSelection {
                        candidates: discovery.templates.clone(),
                    })
                }
            },
        };
        info!(template = %template.display(), "Using template file");

        let chain = match selector {
            Some(selector) => {
                let indices = selector.select_value_files(&discovery.value_files)?;
                indices
                    .into_iter()
                    .map(|i| {
                        discovery.value_files.get(i).cloned().ok_or_else(|| {
                            ConfiguratorError::InvalidSelection(format!(
                                "value file index {} is out of range",
                                i + 1
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let nearby = nearest(&template, &discovery.value_files);
                let chain_request = ChainRequest {
                    environment: &request.environment,
                    single_env: request.single_env,
                };
                resolve_chain(&nearby, &chain_request, &self.environments)?
            }
        };

        Ok(Plan { template, chain })
    }

    /// Load and merge the chain, substitute, and write unless previewing.
    pub fn apply(&self, plan: &Plan, request: &RunRequest) -> Result<Applied, ConfiguratorError> {
        let mut diagnostics = Diagnostics::new(request.verbose);

        let mut mappings: Vec<ValueMapping> = Vec::with_capacity(plan.chain.len());
        for path in &plan.chain {
            mappings.push(load_value_file(path, &mut diagnostics)?);
        }
        let merged = merge_value_mappings(mappings, &mut diagnostics);

        let content =
            fs::read(&plan.template).map_err(|e| ConfiguratorError::io(&plan.template, e))?;
        let substitution = substitute::apply(&content, &merged);

        let written = !request.preview;
        if written {
            write_atomic(&plan.template, &substitution.content)?;
            info!(
                template = %plan.template.display(),
                replacements = substitution.replacements.len(),
                "Template written"
            );
        } else {
            debug!(template = %plan.template.display(), "Preview only; template left untouched");
        }

        Ok(Applied {
            title: merged.title,
            replacements: substitution.replacements,
            diagnostics: diagnostics.into_entries(),
            written,
        })
    }

    /// Discover, plan and apply in one call.
    pub fn run(
        &self,
        request: &RunRequest,
        selector: Option<&mut dyn Selector>,
    ) -> Result<RunOutcome, ConfiguratorError> {
        let discovery = self.discover(&request.root)?;
        let plan = self.plan(&discovery, request, selector)?;
        let applied = self.apply(&plan, request)?;
        Ok(RunOutcome {
            discovery,
            plan,
            applied,
        })
    }
}

fn validate_explicit_template(path: &Path) -> Result<PathBuf, ConfiguratorError> {
    if !path.is_file() {
        return Err(ConfiguratorError::InvalidExplicitTemplate {
            path: path.to_path_buf(),
            reason: "unable to find the file".to_string(),
        });
    }
    if !contains_template_variables(path)? {
        return Err(ConfiguratorError::InvalidExplicitTemplate {
            path: path.to_path_buf(),
            reason: "it does not contain any template variables".to_string(),
        });
    }
    Ok(path.to_path_buf())
}

/// Replace `path` with `content` in one step: write a sibling temp file, then
/// rename it over the original. The original's permissions are kept.
///
/// A symlinked `path` is resolved first, so the link stays a link and its
/// target receives the new content.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ConfiguratorError> {
    let target = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = target.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(ConfiguratorError::io(&temp_path, e));
    }

    if let Ok(metadata) = fs::metadata(&target) {
        if let Err(e) = fs::set_permissions(&temp_path, metadata.permissions()) {
            let _ = fs::remove_file(&temp_path);
            return Err(ConfiguratorError::io(&temp_path, e));
        }
    }

    fs::rename(&temp_path, &target).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        ConfiguratorError::io(&target, e)
    })
}
