//! Filesystem walker for discovering candidate files

use crate::error::ConfiguratorError;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Directory names pruned from traversal (exact, case-sensitive match)
    pub ignored_dirs: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            ignored_dirs: crate::config::DEFAULT_IGNORED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect every file outside pruned directories.
    ///
    /// Symlinks to files are listed; symlinked directories are not entered.
    /// Unreadable entries below the root are skipped with a warning; a root
    /// that cannot be read is an error. Returns paths sorted for determinism.
    pub fn files(&self) -> Result<Vec<PathBuf>, ConfiguratorError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| self.root.clone());
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                    return Err(ConfiguratorError::io(path, source));
                }
            };

            if Self::is_file(&entry) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_file(entry: &DirEntry) -> bool {
        if entry.path_is_symlink() {
            fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
        } else {
            entry.file_type().is_file()
        }
    }

    /// A directory below the root whose name is in the ignore set.
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        let pruned = self.config.ignored_dirs.iter().any(|d| d.as_str() == name);
        if pruned {
            debug!(path = %entry.path().display(), "Pruning ignored directory");
        }
        pruned
    }
}
