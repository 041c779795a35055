//! Environment chain resolution.
//!
//! Turns the nearest value files and a requested environment into the ordered
//! list of files to merge, most specific first.

use crate::error::ConfiguratorError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ordered environment tiers, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments {
    order: Vec<String>,
}

impl Environments {
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|e| e == name)
    }

    /// The requested tier and every less specific one after it.
    pub fn from_tier(&self, index: usize) -> &[String] {
        &self.order[index..]
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ENVIRONMENTS.iter().copied())
    }
}

/// How to turn a requested environment into a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest<'a> {
    pub environment: &'a str,
    pub single_env: bool,
}

fn base_name_starts_with(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(prefix))
}

/// Candidates whose base name starts with `prefix` (case-sensitive).
fn matching<'c>(candidates: &'c [PathBuf], prefix: &str) -> Vec<&'c PathBuf> {
    candidates
        .iter()
        .filter(|c| base_name_starts_with(c, prefix))
        .collect()
}

/// Resolve the value-file chain for a request.
///
/// Single-environment mode (or an environment name that is not a known tier)
/// needs exactly one match. Hierarchical mode walks the requested tier and
/// every less specific tier, taking at most one file per tier and skipping
/// tiers without a file.
pub fn resolve_chain(
    candidates: &[PathBuf],
    request: &ChainRequest<'_>,
    environments: &Environments,
) -> Result<Vec<PathBuf>, ConfiguratorError> {
    let tier = environments.position(request.environment);

    let chain = match tier {
        Some(index) if !request.single_env => {
            let mut chain = Vec::new();
            for env in environments.from_tier(index) {
                let found = matching(candidates, env);
                match found.as_slice() {
                    [] => debug!(environment = %env, "No value file for tier; skipping"),
                    [one] => chain.push((*one).clone()),
                    _ => {
                        return Err(ConfiguratorError::AmbiguousEnvironment {
                            environment: env.clone(),
                            matches: found.into_iter().cloned().collect(),
                        })
                    }
                }
            }
            chain
        }
        _ => {
            let found = matching(candidates, request.environment);
            match found.as_slice() {
                [] => {
                    return Err(ConfiguratorError::NoMatchingEnvironment {
                        environment: request.environment.to_string(),
                    })
                }
                [one] => vec![(*one).clone()],
                _ => {
                    return Err(ConfiguratorError::AmbiguousEnvironment {
                        environment: request.environment.to_string(),
                        matches: found.into_iter().cloned().collect(),
                    })
                }
            }
        }
    };

    debug!(
        environment = request.environment,
        single_env = request.single_env,
        chain = ?chain,
        "Resolved value file chain"
    );
    Ok(chain)
}
