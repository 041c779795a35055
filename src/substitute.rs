//! Template substitution.
//!
//! Each key is applied in mapping order, `%%KEY%%` before `%KEY%`. One pass per
//! placeholder form walks the current text once, left to right, copying the
//! gaps and the replacement values into a fresh buffer. Inserted values are
//! never rescanned by the pass that inserted them.
//!
//! Matching is on bytes, so templates in any ASCII-compatible encoding are
//! rewritten without being decoded.

use crate::values::{display_bytes, ValueMapping};
use serde::Serialize;

/// One replacement made (or that would be made, in preview).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub placeholder: String,
    pub value: String,
    /// 1-based line of the match in the text as rewritten so far.
    pub line: usize,
}

/// Rewritten content plus every replacement, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    pub content: Vec<u8>,
    pub replacements: Vec<Replacement>,
}

/// The two accepted placeholder forms for a key, in application order.
pub fn placeholder_forms(key: &[u8]) -> [Vec<u8>; 2] {
    [
        [&b"%%"[..], key, &b"%%"[..]].concat(),
        [&b"%"[..], key, &b"%"[..]].concat(),
    ]
}

/// Apply every key of `mapping` to `content`. Pure; the caller decides
/// whether the result is written anywhere.
pub fn apply(content: impl AsRef<[u8]>, mapping: &ValueMapping) -> Substitution {
    let mut current = content.as_ref().to_vec();
    let mut replacements = Vec::new();

    for (key, value) in mapping.iter() {
        for placeholder in placeholder_forms(key) {
            if let Some(rewritten) = replace_pass(&current, &placeholder, value, &mut replacements)
            {
                current = rewritten;
            }
        }
    }

    Substitution {
        content: current,
        replacements,
    }
}

/// Offset of the first `needle` in `haystack` at or after `from`.
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

fn count_lines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Replace every non-overlapping occurrence of `placeholder`, left to right.
/// Returns `None` when there was nothing to replace.
fn replace_pass(
    text: &[u8],
    placeholder: &[u8],
    value: &[u8],
    replacements: &mut Vec<Replacement>,
) -> Option<Vec<u8>> {
    let mut start = find(text, placeholder, 0)?;

    let mut out = Vec::with_capacity(text.len());
    let mut copied = 0;
    // line number at the end of `out`
    let mut line = 1;

    loop {
        let gap = &text[copied..start];
        line += count_lines(gap);
        out.extend_from_slice(gap);

        replacements.push(Replacement {
            placeholder: display_bytes(placeholder).into_owned(),
            value: display_bytes(value).into_owned(),
            line,
        });

        out.extend_from_slice(value);
        line += count_lines(value);
        copied = start + placeholder.len();

        match find(text, placeholder, copied) {
            Some(next) => start = next,
            None => break,
        }
    }
    out.extend_from_slice(&text[copied..]);

    Some(out)
}
