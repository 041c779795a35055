//! Informational diagnostics collected during a run.
//!
//! Verbosity is an explicit setting owned by the run and passed by `&mut` to
//! the loader and merge engine. Nothing in here is ever fatal.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// A single informational finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A merged key repeats the value already set earlier in the chain.
    Redundant {
        key: String,
        value: String,
        earlier_title: String,
    },
    /// A key appears more than once in one value file; the later line wins.
    DuplicateKey {
        key: String,
        file: PathBuf,
        line_number: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Redundant {
                key,
                value,
                earlier_title,
            } => write!(
                f,
                "Redundant specification of {} ('{}') in {}",
                key, value, earlier_title
            ),
            Diagnostic::DuplicateKey {
                key,
                file,
                line_number,
            } => write!(
                f,
                "Key {} is specified again on line {} of {}; the later value wins",
                key,
                line_number,
                file.display()
            ),
        }
    }
}

/// Verbosity setting plus everything recorded under it.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    verbose: bool,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            entries: Vec::new(),
        }
    }

    pub fn verbose() -> Self {
        Self::new(true)
    }

    pub fn quiet() -> Self {
        Self::new(false)
    }

    /// Record a diagnostic. Dropped (logged at debug only) unless verbose.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if self.verbose {
            self.entries.push(diagnostic);
        } else {
            debug!(%diagnostic, "diagnostic suppressed (not verbose)");
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
