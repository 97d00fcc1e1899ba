//! Analyses layered over a built [`WordGraph`](crate::graph::WordGraph).
//!
//! - [`score`]: semantic score of a single path and of a batch of paths
//! - [`probe`]: a found path with every step explained
//! - [`audit`]: completeness and integrity report for the whole graph
//!
//! All analyses are pure reads; any number may run against one graph at once.

pub mod audit;
pub mod probe;
pub mod score;

pub use audit::{AuditReport, IntegrityViolation, audit};
pub use probe::{PathProbe, probe};
pub use score::{
    Evaluation, PairScore, PathScore, PathScorer, Verdict, evaluate, score_pairs, score_path,
};
