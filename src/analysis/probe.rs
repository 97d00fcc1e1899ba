//! Path probe: find a path and explain each hop.
//!
//! A probe combines the shortest-path search with a readable description of
//! every step, and flags hops between taxonomic things that cross between
//! category pairs listed in [`HeuristicTables::category_jumps`] without an
//! associative link to justify them.

use serde::Serialize;

use crate::config::HeuristicTables;
use crate::graph::{PathFinder, Relation, WordGraph, classify};

/// Issue reported when the endpoints are not connected.
pub const NO_PATH_ISSUE: &str = "No path found between words";

/// One explained hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeStep {
    /// 1-based position in the path.
    pub step: usize,
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub description: String,
}

/// Outcome of probing a word pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathProbe {
    pub start: String,
    pub end: String,
    pub path: Option<Vec<String>>,
    pub steps: Vec<ProbeStep>,
    pub issues: Vec<String>,
}

impl PathProbe {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of hops, `None` without a path.
    pub fn hops(&self) -> Option<usize> {
        self.path.as_ref().map(|p| p.len().saturating_sub(1))
    }
}

/// Find and explain the path from `start` to `end`.
pub fn probe(
    graph: &WordGraph,
    finder: &PathFinder,
    tables: &HeuristicTables,
    start: &str,
    end: &str,
) -> PathProbe {
    let Some(path) = finder.shortest_path(graph, start, end) else {
        return PathProbe {
            start: start.to_string(),
            end: end.to_string(),
            path: None,
            steps: Vec::new(),
            issues: vec![NO_PATH_ISSUE.to_string()],
        };
    };

    let mut steps = Vec::with_capacity(path.len().saturating_sub(1));
    let mut issues = Vec::new();

    for (i, pair) in path.windows(2).enumerate() {
        let (from, to) = (pair[0].as_str(), pair[1].as_str());
        let connection = classify(graph, from, to);
        let step = i + 1;

        if connection.relation != Relation::Acquaintance {
            if let Some((from_parent, to_parent)) = category_jump(graph, tables, from, to) {
                issues.push(format!(
                    "Step {step}: Potentially illogical jump from {from} ({from_parent}) to {to} ({to_parent})"
                ));
            }
        }

        steps.push(ProbeStep {
            step,
            from: from.to_string(),
            to: to.to_string(),
            description: connection.describe(),
            relation: connection.relation,
        });
    }

    PathProbe {
        start: start.to_string(),
        end: end.to_string(),
        path: Some(path),
        steps,
        issues,
    }
}

/// Parents of both words when the hop matches a category-jump rule.
///
/// Only hops between two words of the thing type, both with parents, are
/// considered. Each rule side matches the word itself or its parent.
fn category_jump<'g>(
    graph: &'g WordGraph,
    tables: &HeuristicTables,
    from: &str,
    to: &str,
) -> Option<(&'g str, &'g str)> {
    let a = graph.get(from)?;
    let b = graph.get(to)?;
    if !a.is_type(&tables.thing_type) || !b.is_type(&tables.thing_type) {
        return None;
    }
    let pa = a.parent.as_deref()?;
    let pb = b.parent.as_deref()?;

    let hit = tables.category_jumps.iter().any(|rule| {
        [pa, from]
            .iter()
            .any(|f| [pb, to].iter().any(|t| rule.matches(f, t)))
    });
    hit.then_some((pa, pb))
}
