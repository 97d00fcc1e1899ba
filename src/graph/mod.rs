//! Word graph: the in-memory store and the algorithms that read it.
//!
//! - [`WordGraph`] holds every [`WordEntry`](crate::word::WordEntry) in load order
//! - [`classify`](classify::classify) labels the relation between adjacent words
//! - [`shortest_path`](path::shortest_path) runs BFS over parent, child and acquaintance links
//! - [`analytics`] computes connected components with `petgraph`
//!
//! Nothing in this module mutates a graph after it is built.

pub mod analytics;
pub mod classify;
pub mod index;
pub mod load;
pub mod path;

pub use classify::{Connection, Relation, classify};
pub use index::{GraphResult, WordGraph};
pub use load::MasterDocument;
pub use path::{PathFinder, shortest_path};
