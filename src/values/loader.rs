//! Value file loader: one `key=value` pair per line.

use super::{display_bytes, ValueMapping};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ConfiguratorError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Parse a value file into a mapping titled with the file's base name.
///
/// Each line is trimmed; blank lines are skipped; the rest split on the first
/// `=`. Keys and values are kept as the bytes on disk. A key repeated within
/// the file takes the later value and is reported as a diagnostic.
pub fn load_value_file(
    path: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<ValueMapping, ConfiguratorError> {
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path).map_err(|e| ConfiguratorError::io(path, e))?;

    let mut mapping = ValueMapping::new(title);
    for (i, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line = line.map_err(|e| ConfiguratorError::io(path, e))?;
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let Some(eq) = line.iter().position(|&b| b == b'=') else {
            return Err(ConfiguratorError::ValueFileParse {
                path: path.to_path_buf(),
                line_number: i + 1,
                line: display_bytes(line).into_owned(),
            });
        };
        let (key, value) = (&line[..eq], &line[eq + 1..]);

        if mapping.insert(key, value).is_some() {
            diagnostics.record(Diagnostic::DuplicateKey {
                key: display_bytes(key).into_owned(),
                file: path.to_path_buf(),
                line_number: i + 1,
            });
        }
    }

    debug!(path = %path.display(), keys = mapping.len(), "Loaded value file");
    Ok(mapping)
}
