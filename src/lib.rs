// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # six-degrees
//!
//! A word knowledge graph: every word has at most one taxonomic parent, a set
//! of children, descriptive traits and associative acquaintances. The crate
//! answers "how are these two words connected?" and "is that connection
//! sensible?", and audits the graph for gaps and structural defects.
//!
//! ## Architecture
//!
//! - **Word entries** (`word`): node records and processing stage flags
//! - **Graph store** (`graph`): load-ordered index, JSON loader, connection
//!   classifier, BFS path finder and connectivity analytics
//! - **Analyses** (`analysis`): path scoring, path probing, structural audit
//! - **Configuration** (`config`): heuristic word tables and score thresholds
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use six_degrees::config::AnalysisConfig;
//! use six_degrees::graph::{WordGraph, shortest_path};
//! use six_degrees::analysis::score_path;
//!
//! let graph = WordGraph::load(Path::new("data/processed/unified_master.json")).unwrap();
//! let config = AnalysisConfig::default();
//! if let Some(path) = shortest_path(&graph, "Cat", "Political") {
//!     let report = score_path(&graph, &path, &config);
//!     println!("{} ({})", path.join(" -> "), report.score);
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod word;
