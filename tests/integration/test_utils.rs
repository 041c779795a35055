//! Shared test utilities for integration tests
//!
//! Fixture trees for template/value layouts, and serialized access to the
//! environment variables that configuration loading reads.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(keys: &[&str]) -> Self {
        Self {
            vars: keys
                .iter()
                .map(|k| (k.to_string(), std::env::var(k).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.vars {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Run `f` with `HOME` and `XDG_CONFIG_HOME` pointed into `test_dir`, plus any
/// extra variables, restoring everything afterwards.
pub fn with_env<F, R>(test_dir: &TempDir, extra: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let mut keys = vec!["HOME", "XDG_CONFIG_HOME"];
    keys.extend(extra.iter().map(|(k, _)| *k));
    let env_state = EnvState::capture(&keys);

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("xdg-config");
    fs::create_dir_all(&test_home).unwrap();
    fs::create_dir_all(&test_config_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    for (key, value) in extra {
        std::env::set_var(key, value);
    }

    let result = f();

    env_state.restore();

    result
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A service directory with a template and a full dev/qa/prod diff chain.
///
/// ```text
/// svc/app.config        Url, Timeout, Retries placeholders
/// svc/dev.app.config    Url
/// svc/qa.app.config     Url, Timeout
/// svc/prod.app.config   Url, Timeout, Retries
/// ```
pub fn hierarchical_fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(
        root,
        "svc/app.config",
        "<configuration>\n  <add key=\"Url\" value=\"%%Url%%\"/>\n  <add key=\"Timeout\" value=\"%Timeout%\"/>\n  <add key=\"Retries\" value=\"%Retries%\"/>\n</configuration>\n",
    );
    write_file(root, "svc/dev.app.config", "Url=http://dev.local\n");
    write_file(root, "svc/qa.app.config", "Url=http://qa.local\nTimeout=60\n");
    write_file(
        root,
        "svc/prod.app.config",
        "Url=https://prod.example.com\nTimeout=30\nRetries=5\n",
    );
    dir
}
