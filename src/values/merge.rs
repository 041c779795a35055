//! Merge engine: fill-in merge of an ordered chain of mappings.
//!
//! The first mapping has the highest precedence. Later mappings only add keys
//! that are still missing, so a chain ordered most-specific-first gives the
//! specific environment the last word without any environment logic here.

use super::{display_bytes, ValueMapping, TITLE_SEPARATOR};
use crate::diagnostics::{Diagnostic, Diagnostics};
use tracing::debug;

/// Merge mappings in chain order.
///
/// - missing key: inserted
/// - same key, identical value: kept, reported as redundant against the title
///   of the mapping just before the current one
/// - same key, different value: the earlier value wins silently
pub fn merge_value_mappings(
    mappings: Vec<ValueMapping>,
    diagnostics: &mut Diagnostics,
) -> ValueMapping {
    let mut chain = mappings.into_iter();
    let Some(mut result) = chain.next() else {
        return ValueMapping::default();
    };

    let mut previous_title = result.title.clone();
    for mapping in chain {
        result.title.push_str(TITLE_SEPARATOR);
        result.title.push_str(&mapping.title);

        for (key, value) in mapping.iter() {
            match result.get(key) {
                None => {
                    result.insert(key, value);
                }
                Some(existing) if existing == value => {
                    diagnostics.record(Diagnostic::Redundant {
                        key: display_bytes(key).into_owned(),
                        value: display_bytes(value).into_owned(),
                        earlier_title: previous_title.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        previous_title = mapping.title;
    }

    debug!(title = %result.title, keys = result.len(), "Merged value mappings");
    result
}
