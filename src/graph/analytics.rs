//! Graph analytics: connected components of the traversal graph.
//!
//! Parent, child and acquaintance links are loaded into an undirected
//! `petgraph` graph; components come from Tarjan's SCC, which on an
//! undirected graph yields connected components. Links to words that are not
//! in the graph are ignored here (the auditor reports them as dangling).

use petgraph::algo::tarjan_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use super::index::WordGraph;

/// A connected component of the traversal graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedComponent {
    /// Members in load order.
    pub members: Vec<String>,
    pub size: usize,
}

/// Connectivity summary of the whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Connectivity {
    /// Components sorted by size desc, then by earliest member.
    pub components: Vec<ConnectedComponent>,
    /// Words with no link to any other known word, in load order.
    pub isolated: Vec<String>,
    /// Words outside the connector's component, in load order. Empty when
    /// the connector itself is not in the graph.
    pub detached_from_connector: Vec<String>,
}

/// Compute connected components and the words a path through `connector`
/// can never reach.
pub fn connectivity(graph: &WordGraph, connector: &str) -> Connectivity {
    let mut ug: UnGraph<usize, ()> = UnGraph::with_capacity(graph.len(), 0);
    let nodes: Vec<NodeIndex> = (0..graph.len()).map(|i| ug.add_node(i)).collect();

    for (i, id) in graph.ids().enumerate() {
        for neighbor in graph.neighbors(id) {
            if let Some(j) = graph.index_of(neighbor) {
                ug.add_edge(nodes[i], nodes[j], ());
            }
        }
    }

    let ids = graph.all_ids();
    let mut components: Vec<ConnectedComponent> = tarjan_scc(&ug)
        .into_iter()
        .map(|scc| {
            let mut positions: Vec<usize> = scc.iter().map(|idx| ug[*idx]).collect();
            positions.sort_unstable();
            ConnectedComponent {
                size: positions.len(),
                members: positions.into_iter().map(|p| ids[p].to_string()).collect(),
            }
        })
        .collect();
    components.sort_by(|a, b| {
        b.size.cmp(&a.size).then_with(|| {
            graph
                .index_of(&a.members[0])
                .cmp(&graph.index_of(&b.members[0]))
        })
    });

    let isolated: Vec<String> = nodes
        .iter()
        .filter(|n| ug.neighbors(**n).next().is_none())
        .map(|n| ids[ug[*n]].to_string())
        .collect();

    let detached_from_connector = match components
        .iter()
        .find(|c| c.members.iter().any(|m| m == connector))
    {
        Some(home) => graph
            .ids()
            .filter(|id| !home.members.iter().any(|m| m == id))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    tracing::debug!(
        components = components.len(),
        isolated = isolated.len(),
        detached = detached_from_connector.len(),
        "connectivity computed"
    );

    Connectivity {
        components,
        isolated,
        detached_from_connector,
    }
}
