//! Connection classification between two adjacent words.
//!
//! Precedence is fixed, most specific first: child-of, parent-of, sibling,
//! acquaintance, unknown. Unknown words are classified as if they were empty
//! records, so classification never fails.

use serde::{Deserialize, Serialize};

use crate::word::WordEntry;

use super::index::WordGraph;

/// How two adjacent words relate, seen from the first word `a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "label", rename_all = "kebab-case")]
pub enum Relation {
    /// `b.parent == a`: `b` is a child of `a`.
    ChildOf,
    /// `a.parent == b`: `a` is a child of `b`.
    ParentOf,
    /// Both words share the given parent.
    Sibling { parent: String },
    /// One lists the other as an acquaintance, on either side.
    Acquaintance,
    /// None of the above.
    Unknown,
}

impl Relation {
    pub fn label(&self) -> &'static str {
        match self {
            Relation::ChildOf => "child-of",
            Relation::ParentOf => "parent-of",
            Relation::Sibling { .. } => "sibling",
            Relation::Acquaintance => "acquaintance",
            Relation::Unknown => "unknown",
        }
    }

    /// Heuristic closeness: taxonomic 1, associative 2, unclassified 3.
    ///
    /// Siblings have no rank of their own and count as unclassified here;
    /// [`classify`] lowers them to 2 when an acquaintance link joins the pair.
    pub fn semantic_distance(&self) -> u8 {
        match self {
            Relation::ChildOf | Relation::ParentOf => 1,
            Relation::Acquaintance => 2,
            Relation::Sibling { .. } | Relation::Unknown => 3,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification result for an ordered word pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub semantic_distance: u8,
}

impl Connection {
    /// Human-readable relationship sentence.
    pub fn describe(&self) -> String {
        let (a, b) = (&self.from, &self.to);
        match &self.relation {
            Relation::ChildOf => format!("{b} is a child/subtype of {a}"),
            Relation::ParentOf => format!("{a} is a child/subtype of {b}"),
            Relation::Sibling { parent } => {
                format!("{a} and {b} are siblings (both children of {parent})")
            }
            Relation::Acquaintance => format!("{b} is an acquaintance of {a}"),
            Relation::Unknown => "Unknown relationship".to_string(),
        }
    }
}

/// Classify the relation from `a` to `b`.
pub fn classify(graph: &WordGraph, a: &str, b: &str) -> Connection {
    let empty_a;
    let empty_b;
    let ea = match graph.get(a) {
        Some(e) => e,
        None => {
            empty_a = WordEntry::new(a);
            &empty_a
        }
    };
    let eb = match graph.get(b) {
        Some(e) => e,
        None => {
            empty_b = WordEntry::new(b);
            &empty_b
        }
    };
    let relation = relation_between(ea, eb);
    let semantic_distance = match relation {
        Relation::Sibling { .. } if acquainted(ea, eb) => {
            Relation::Acquaintance.semantic_distance()
        }
        _ => relation.semantic_distance(),
    };
    Connection {
        from: a.to_string(),
        to: b.to_string(),
        semantic_distance,
        relation,
    }
}

/// Either word lists the other as an acquaintance.
fn acquainted(a: &WordEntry, b: &WordEntry) -> bool {
    a.has_acquaintance(&b.id) || b.has_acquaintance(&a.id)
}

/// Apply the precedence rules to two entries.
pub fn relation_between(a: &WordEntry, b: &WordEntry) -> Relation {
    if b.parent.as_deref() == Some(a.id.as_str()) {
        return Relation::ChildOf;
    }
    if a.parent.as_deref() == Some(b.id.as_str()) {
        return Relation::ParentOf;
    }
    if let (Some(pa), Some(pb)) = (&a.parent, &b.parent) {
        if pa == pb {
            return Relation::Sibling { parent: pa.clone() };
        }
    }
    if acquainted(a, b) {
        return Relation::Acquaintance;
    }
    Relation::Unknown
}
