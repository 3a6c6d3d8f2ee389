//! Journal aggregate root

use crate::domain::Entry;

/// A named, ordered collection of entries.
///
/// Insertion order is the only ordering; entries are never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub name: Option<String>,
    pub entries: Vec<Entry>,
}

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Journal {
            name: Some(name.into()),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries.extend(entries);
    }

    /// Total number of photos across all entries
    pub fn photo_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.photos.len()).sum()
    }
}
