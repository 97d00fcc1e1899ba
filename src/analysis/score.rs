//! Semantic scoring of a word path.
//!
//! Every path starts at the configured initial score. Each consecutive pair
//! is classified; steps that jump straight from a concrete word to an
//! abstract one cost [`ScoringConfig::gap_penalty`] and are marked
//! illogical. Natural taxonomic first steps, concrete-to-abstract bridges and
//! the universal connector are recorded as strengths. The result is fully
//! determined by the path, the graph and the tables.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{AnalysisConfig, HeuristicTables, ScoringConfig};
use crate::graph::{PathFinder, Relation, WordGraph, classify};

/// One scored transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepScore {
    pub from: String,
    pub to: String,
    pub relation: Relation,
    pub semantic_distance: u8,
    pub logical: bool,
}

/// Score report for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathScore {
    pub path: Vec<String>,
    /// Signed; several gap penalties can take it below zero.
    pub score: i32,
    pub steps: Vec<StepScore>,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

/// Presentation bucket for a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Valid,
    Acceptable,
    Flagged,
}

impl Verdict {
    pub fn for_score(score: i32, scoring: &ScoringConfig) -> Self {
        if score >= scoring.valid_threshold {
            Verdict::Valid
        } else if score >= scoring.acceptable_threshold {
            Verdict::Acceptable
        } else {
            Verdict::Flagged
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Valid => write!(f, "VALID"),
            Verdict::Acceptable => write!(f, "ACCEPTABLE"),
            Verdict::Flagged => write!(f, "FLAGGED"),
        }
    }
}

impl PathScore {
    pub fn verdict(&self, scoring: &ScoringConfig) -> Verdict {
        Verdict::for_score(self.score, scoring)
    }

    /// Steps flagged as illogical.
    pub fn illogical_steps(&self) -> impl Iterator<Item = &StepScore> {
        self.steps.iter().filter(|s| !s.logical)
    }
}

/// Scores paths against one graph with one set of tables.
#[derive(Debug, Clone, Copy)]
pub struct PathScorer<'a> {
    graph: &'a WordGraph,
    tables: &'a HeuristicTables,
    scoring: &'a ScoringConfig,
}

impl<'a> PathScorer<'a> {
    pub fn new(graph: &'a WordGraph, config: &'a AnalysisConfig) -> Self {
        Self::with_tables(graph, &config.heuristics, &config.scoring)
    }

    pub fn with_tables(
        graph: &'a WordGraph,
        tables: &'a HeuristicTables,
        scoring: &'a ScoringConfig,
    ) -> Self {
        Self {
            graph,
            tables,
            scoring,
        }
    }

    /// Score a path. Words missing from the graph are scored as empty
    /// records; an empty path keeps the initial score and has no notes.
    pub fn score_path<S: AsRef<str>>(&self, path: &[S]) -> PathScore {
        let words: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
        let t = self.tables;
        let mut score = self.scoring.initial_score;
        let mut steps = Vec::with_capacity(words.len().saturating_sub(1));
        let mut issues = Vec::new();
        let mut strengths = Vec::new();

        for (i, pair) in words.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let connection = classify(self.graph, from, to);
            let mut step = StepScore {
                from: from.to_string(),
                to: to.to_string(),
                semantic_distance: connection.semantic_distance,
                relation: connection.relation,
                logical: true,
            };

            if i == 0 && t.is_natural_pair(from, to) {
                strengths.push(format!("Natural taxonomic relationship: {from} → {to}"));
            }

            if t.is_connector(from) && t.is_connector_division(to) {
                step.semantic_distance = 1;
            }

            if t.is_semantic_gap(from, to) {
                issues.push(format!(
                    "Large semantic gap: {from} (concrete object) → {to} (abstract concept)"
                ));
                score -= self.scoring.gap_penalty;
                step.logical = false;
            }

            steps.push(step);
        }

        if let (Some(first), Some(last)) = (words.first(), words.last()) {
            if t.is_concrete(first) && t.ends_abstract(last) {
                strengths.push("Path successfully bridges from concrete to abstract concepts".into());
            }
        }

        if words.iter().any(|w| t.is_connector(w)) {
            strengths.push(format!(
                "Path uses '{}' as a universal connector - this is semantically valid",
                t.universal_connector
            ));
        }

        tracing::debug!(
            hops = steps.len(),
            score,
            issues = issues.len(),
            strengths = strengths.len(),
            "path scored"
        );

        PathScore {
            path: words.iter().map(|w| w.to_string()).collect(),
            score,
            steps,
            issues,
            strengths,
        }
    }
}

/// Score a path with the given configuration.
pub fn score_path<S: AsRef<str>>(
    graph: &WordGraph,
    path: &[S],
    config: &AnalysisConfig,
) -> PathScore {
    PathScorer::new(graph, config).score_path(path)
}

// ---------------------------------------------------------------------------
// Path-set evaluation
// ---------------------------------------------------------------------------

/// Aggregate view over many scored paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub total_paths: usize,
    pub valid_paths: usize,
    pub acceptable_paths: usize,
    pub flagged_paths: usize,
    pub average_score: f64,
    /// Issue kinds (text before the first `:`) seen at least
    /// `common_issue_min` times, in first-seen order.
    pub common_issues: Vec<String>,
}

/// Summarize a batch of path scores.
pub fn evaluate(scores: &[PathScore], scoring: &ScoringConfig) -> Evaluation {
    let mut valid_paths = 0;
    let mut acceptable_paths = 0;
    let mut flagged_paths = 0;
    let mut total: i64 = 0;
    let mut issue_counts: IndexMap<&str, usize> = IndexMap::new();

    for s in scores {
        match s.verdict(scoring) {
            Verdict::Valid => valid_paths += 1,
            Verdict::Acceptable => acceptable_paths += 1,
            Verdict::Flagged => flagged_paths += 1,
        }
        total += i64::from(s.score);
        for issue in &s.issues {
            let kind = issue.split(':').next().unwrap_or(issue);
            *issue_counts.entry(kind).or_insert(0) += 1;
        }
    }

    let average_score = if scores.is_empty() {
        0.0
    } else {
        total as f64 / scores.len() as f64
    };

    Evaluation {
        total_paths: scores.len(),
        valid_paths,
        acceptable_paths,
        flagged_paths,
        average_score,
        common_issues: issue_counts
            .into_iter()
            .filter(|(_, count)| *count >= scoring.common_issue_min)
            .map(|(kind, _)| kind.to_string())
            .collect(),
    }
}

/// A word pair and the scored shortest path between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairScore {
    pub start: String,
    pub end: String,
    /// `None` when the words are not connected.
    pub score: Option<PathScore>,
}

/// Find and score the shortest path for every pair, in parallel.
///
/// Results keep the order of `pairs`.
pub fn score_pairs(
    graph: &WordGraph,
    finder: &PathFinder,
    config: &AnalysisConfig,
    pairs: &[(String, String)],
) -> Vec<PairScore> {
    use rayon::prelude::*;

    let scorer = PathScorer::new(graph, config);
    let results: Vec<PairScore> = pairs
        .par_iter()
        .map(|(start, end)| PairScore {
            start: start.clone(),
            end: end.clone(),
            score: finder
                .shortest_path(graph, start, end)
                .map(|path| scorer.score_path(&path)),
        })
        .collect();

    tracing::debug!(
        pairs = pairs.len(),
        connected = results.iter().filter(|r| r.score.is_some()).count(),
        "pairs scored"
    );
    results
}
