//! Path resolution and directory-tree distance.

use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Resolve a path to its canonical absolute form.
///
/// Existing paths are canonicalized (symlinks, `..`, `.` resolved). Paths that
/// do not exist fall back to their lexical absolute form so that distance stays
/// total.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Split a path string into segments on both `/` and `\`.
///
/// Empty segments are kept: an absolute Unix path starts with one, and it is
/// shared by every other absolute path.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).collect()
}

fn segment_key(segment: &str) -> String {
    segment.nfc().collect::<String>().to_lowercase()
}

/// Number of directory hops between two path strings through their nearest
/// common ancestor. Segments are compared case-insensitively.
pub fn segment_distance(a: &str, b: &str) -> usize {
    let a_tokens = segments(a);
    let b_tokens = segments(b);

    let common = a_tokens
        .iter()
        .zip(b_tokens.iter())
        .take_while(|(x, y)| segment_key(x) == segment_key(y))
        .count();

    (a_tokens.len() - common) + (b_tokens.len() - common)
}

/// Directory-tree distance between two filesystem paths, after resolving both.
pub fn distance(a: &Path, b: &Path) -> usize {
    let a = resolve_path(a);
    let b = resolve_path(b);
    segment_distance(&a.to_string_lossy(), &b.to_string_lossy())
}
