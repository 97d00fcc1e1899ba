//! Loading the master word document.
//!
//! The document shape is `{"master_words": {"Word": {...}, ...}}`. Keys are
//! parsed into an `IndexMap`, so the graph's iteration order is the order
//! the words appear in the file.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::GraphError;
use crate::word::{WordEntry, WordRecord};

use super::index::{GraphResult, WordGraph};

/// The on-disk master document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MasterDocument {
    pub master_words: IndexMap<String, WordRecord>,
}

impl WordGraph {
    /// Build a graph from a parsed document.
    pub fn from_document(doc: MasterDocument) -> GraphResult<Self> {
        Self::from_entries(
            doc.master_words
                .into_iter()
                .map(|(id, record)| WordEntry::from_record(id, record)),
        )
    }

    /// Parse a JSON master document.
    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let doc: MasterDocument =
            serde_json::from_str(json).map_err(|e| GraphError::MalformedDocument {
                message: e.to_string(),
            })?;
        Self::from_document(doc)
    }

    /// Read and parse a JSON master document from disk.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let graph = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), words = graph.len(), "loaded word document");
        Ok(graph)
    }
}
