//! In-memory word graph store.
//!
//! Entries are held in an `IndexMap` so every iteration (ids, entries,
//! neighbors) follows the load order and reports are reproducible.

use indexmap::{IndexMap, IndexSet};

use crate::error::GraphError;
use crate::word::WordEntry;

/// Result type for graph operations.
pub type GraphResult<T> = std::result::Result<T, GraphError>;

/// Read-only store of all word entries, keyed by word.
///
/// The store has no interior mutability, so a single instance can be shared
/// by reference across threads running independent analyses.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    words: IndexMap<String, WordEntry>,
}

impl WordGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from entries, in the order given.
    ///
    /// A repeated id replaces the earlier entry but keeps its position.
    pub fn from_entries<I>(entries: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let mut words = IndexMap::new();
        for entry in entries {
            if entry.id.is_empty() {
                return Err(GraphError::EmptyId);
            }
            if words.contains_key(&entry.id) {
                tracing::warn!(word = %entry.id, "duplicate word entry replaces earlier one");
            }
            words.insert(entry.id.clone(), entry);
        }
        tracing::debug!(words = words.len(), "word graph built");
        Ok(Self { words })
    }

    /// Look up an entry. Unknown ids are `None`, never an error.
    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.words.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.words.contains_key(id)
    }

    /// All ids in load order.
    pub fn all_ids(&self) -> Vec<&str> {
        self.ids().collect()
    }

    /// Iterate ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    /// Iterate entries in load order.
    pub fn entries(&self) -> impl Iterator<Item = &WordEntry> {
        self.words.values()
    }

    /// Position of an id in load order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.words.get_index_of(id)
    }

    /// The traversal neighborhood of a word.
    ///
    /// `{parent} ∪ children ∪ acquaintances`, in that order, without
    /// duplicates and without the word itself. Unknown ids have no
    /// neighbors. Neighbors need not exist in the graph themselves.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let Some(entry) = self.words.get(id) else {
            return Vec::new();
        };
        let mut out: IndexSet<&str> = IndexSet::new();
        out.extend(entry.parent.as_deref());
        out.extend(entry.children.iter().map(String::as_str));
        out.extend(entry.acquaintances.iter().map(String::as_str));
        out.shift_remove(id);
        out.into_iter().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
