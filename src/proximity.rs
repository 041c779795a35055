//! Proximity: pick the value files closest to a template in the directory tree.

use crate::tree::path::distance;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every candidate tied at the minimum distance from `template`, in candidate
/// order. Ties are kept; resolving them is the environment resolver's job.
pub fn nearest(template: &Path, candidates: &[PathBuf]) -> Vec<PathBuf> {
    let mut best: Option<usize> = None;
    let mut nearby = Vec::new();

    for candidate in candidates {
        let d = distance(template, candidate);
        match best {
            Some(min) if d > min => continue,
            Some(min) if d == min => nearby.push(candidate.clone()),
            _ => {
                best = Some(d);
                nearby.clear();
                nearby.push(candidate.clone());
            }
        }
    }

    debug!(
        template = %template.display(),
        distance = ?best,
        count = nearby.len(),
        "Nearest value files"
    );
    nearby
}
