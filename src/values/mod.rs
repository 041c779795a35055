//! Value mappings: loading `key=value` files and merging them into one chain.
//!
//! Keys and values are raw bytes. Value files and templates are taken as they
//! are on disk, whatever their encoding; text is only decoded for reporting.

pub mod loader;
pub mod merge;

use std::borrow::Cow;
use std::collections::HashMap;

pub use loader::load_value_file;
pub use merge::merge_value_mappings;

/// Separator between titles of merged mappings.
pub const TITLE_SEPARATOR: &str = " -> ";

const UNTITLED: &str = "Untitled Mapping";

/// Insertion-ordered key to value mapping with a provenance title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueMapping {
    pub title: String,
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    index: HashMap<Vec<u8>, usize>,
}

impl Default for ValueMapping {
    fn default() -> Self {
        Self::new(UNTITLED)
    }
}

impl ValueMapping {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Set a key. An existing key keeps its position and takes the new value.
    /// Returns the previous value, if any.
    pub fn insert(
        &mut self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.index
            .get(key.as_ref())
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.index.contains_key(key.as_ref())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(|(k, _)| k.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Vec<u8>>, V: Into<Vec<u8>>> FromIterator<(K, V)> for ValueMapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = ValueMapping::default();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

/// Decode bytes for messages and reports. Invalid sequences become U+FFFD.
pub fn display_bytes(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
