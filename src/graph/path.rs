//! Shortest-path search between two words.
//!
//! Breadth-first search over [`WordGraph::neighbors`]: parent, children and
//! acquaintances as each word records them. Parent and child links normally
//! mirror each other; a one-sided acquaintance is only walkable from the word
//! that lists it. The search is unweighted: it minimizes hop
//! count, not semantic distance. Among equally short paths the first one
//! discovered wins, which follows neighbor load order.

use std::collections::{HashMap, VecDeque};

use super::index::WordGraph;

/// Configurable BFS path finder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFinder {
    /// Stop exploring after this many words have been visited.
    /// `None` explores the whole component.
    max_visited: Option<usize>,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the search for very large graphs. Hitting the bound yields no
    /// path.
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = Some(max_visited);
        self
    }

    /// Find a minimum-hop path from `start` to `end`, inclusive.
    ///
    /// Returns `None` when either endpoint is unknown or no path exists.
    pub fn shortest_path(
        &self,
        graph: &WordGraph,
        start: &str,
        end: &str,
    ) -> Option<Vec<String>> {
        if !graph.contains(start) || !graph.contains(end) {
            tracing::debug!(start, end, "path endpoint not in graph");
            return None;
        }
        if start == end {
            return Some(vec![start.to_string()]);
        }

        // word -> predecessor; a word is recorded here when it is enqueued.
        let mut came_from: HashMap<&str, Option<&str>> = HashMap::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        came_from.insert(start, None);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in graph.neighbors(current) {
                if came_from.contains_key(next) {
                    continue;
                }
                came_from.insert(next, Some(current));
                if next == end {
                    let path = unwind(&came_from, end);
                    tracing::debug!(start, end, hops = path.len() - 1, "shortest path found");
                    return Some(path);
                }
                if self.max_visited.is_some_and(|max| came_from.len() >= max) {
                    tracing::warn!(
                        start,
                        end,
                        visited = came_from.len(),
                        "path search bound reached"
                    );
                    return None;
                }
                queue.push_back(next);
            }
        }

        tracing::debug!(start, end, visited = came_from.len(), "no path between words");
        None
    }
}

/// Shortest path with an unbounded search.
pub fn shortest_path(graph: &WordGraph, start: &str, end: &str) -> Option<Vec<String>> {
    PathFinder::new().shortest_path(graph, start, end)
}

fn unwind(came_from: &HashMap<&str, Option<&str>>, end: &str) -> Vec<String> {
    let mut path = vec![end.to_string()];
    let mut cursor = came_from.get(end).copied().flatten();
    while let Some(word) = cursor {
        path.push(word.to_string());
        cursor = came_from.get(word).copied().flatten();
    }
    path.reverse();
    path
}
