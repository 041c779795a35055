//! CLI route: run context built from parsed flags, driving the engine stage by
//! stage and printing progress between stages.

use crate::cli::parse::Cli;
use crate::cli::presentation::{
    format_banner, format_diagnostics, format_done, format_loading, format_outcome_json,
    format_populating, format_replacement, format_search_root, format_template_choice,
    format_untemplated,
};
use crate::cli::prompt::TerminalSelector;
use crate::config::{ConfigLoader, ConfiguratorConfig};
use crate::error::ConfiguratorError;
use crate::run::{Configurator, RunOutcome, RunRequest, Selector};
use std::io::Write;
use tracing::info;

/// Runtime context for CLI execution: the loaded configuration, the engine and
/// the request derived from the flags.
pub struct RunContext {
    configurator: Configurator,
    request: RunRequest,
    interactive: bool,
    json: bool,
}

impl RunContext {
    /// Create run context from parsed flags. Loads configuration for the search root.
    pub fn new(cli: &Cli) -> Result<Self, ConfiguratorError> {
        let config = load_config(cli)?;
        Ok(Self::with_config(cli, &config))
    }

    /// Create run context from parsed flags and an already loaded configuration.
    pub fn with_config(cli: &Cli, config: &ConfiguratorConfig) -> Self {
        let environment = cli
            .env
            .clone()
            .unwrap_or_else(|| config.environments.default.clone());

        Self {
            configurator: Configurator::from_config(config),
            request: RunRequest {
                root: cli.dir.clone(),
                environment,
                single_env: cli.single_env,
                template: cli.template.clone(),
                preview: cli.whatif,
                verbose: cli.verbose,
            },
            interactive: cli.interactive,
            json: cli.format == "json",
        }
    }

    pub fn request(&self) -> &RunRequest {
        &self.request
    }

    /// Run once, writing the report to `out`.
    pub fn execute(&self, out: &mut dyn Write) -> Result<RunOutcome, ConfiguratorError> {
        let mut terminal = TerminalSelector;
        let selector: Option<&mut dyn Selector> = if self.interactive {
            Some(&mut terminal)
        } else {
            None
        };
        self.execute_with(out, selector)
    }

    /// Run once with a caller-supplied selector for interactive choices.
    pub fn execute_with(
        &self,
        out: &mut dyn Write,
        selector: Option<&mut dyn Selector>,
    ) -> Result<RunOutcome, ConfiguratorError> {
        let request = &self.request;
        let mut report = Report {
            out,
            enabled: !self.json,
        };

        report.line(&format_banner())?;
        report.line(&format_search_root(&request.root))?;

        let discovery = self.configurator.discover(&request.root)?;
        for path in &discovery.untemplated {
            report.line(&format_untemplated(path))?;
        }

        let plan = self.configurator.plan(&discovery, request, selector)?;
        report.line(&format_template_choice(&plan))?;
        for path in &plan.chain {
            report.line(&format_loading(path))?;
        }

        let applied = self.configurator.apply(&plan, request)?;
        if let Some(diagnostics) = format_diagnostics(&applied.diagnostics) {
            report.line(&diagnostics)?;
        }
        report.line(&format_populating(&plan, &applied))?;
        if request.verbose || request.preview {
            for replacement in &applied.replacements {
                report.line(&format_replacement(replacement))?;
            }
        }
        report.line(&format_done(&applied))?;

        let outcome = RunOutcome {
            discovery,
            plan,
            applied,
        };
        if self.json {
            let json = format_outcome_json(&outcome)?;
            writeln!(report.out, "{}", json).map_err(|e| ConfiguratorError::io("<stdout>", e))?;
        }

        info!(
            template = %outcome.plan.template.display(),
            files = outcome.plan.chain.len(),
            "Run completed"
        );
        Ok(outcome)
    }
}

/// Load configuration: an explicit `--config` file, or the layered sources for
/// the search root.
pub fn load_config(cli: &Cli) -> Result<ConfiguratorConfig, ConfiguratorError> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.dir),
    }
}

/// Text report sink; silent in json mode.
struct Report<'a> {
    out: &'a mut dyn Write,
    enabled: bool,
}

impl Report<'_> {
    fn line(&mut self, text: &str) -> Result<(), ConfiguratorError> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.out, "{}", text).map_err(|e| ConfiguratorError::io("<stdout>", e))
    }
}
