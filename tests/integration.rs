//! End-to-end tests for the six-degrees crate.
//!
//! These load a master document from disk and run path finding, scoring,
//! probing and the audit against it through the public API only.

use std::sync::Arc;

use six_degrees::analysis::audit::IntegrityViolation;
use six_degrees::analysis::{Verdict, audit, evaluate, probe, score_pairs, score_path};
use six_degrees::config::AnalysisConfig;
use six_degrees::error::{GraphError, SixDegreesError};
use six_degrees::graph::{PathFinder, Relation, WordGraph, classify, shortest_path};

const MASTER: &str = r#"{
  "master_words": {
    "Thing": {
      "parent": null,
      "children": ["Animal", "Object", "Concept", "System"],
      "traits": ["exists"],
      "acquaintances": [],
      "type": "thing",
      "stages": {"childrenDone": true, "rawLogged": true, "traitsPromoted": true, "rolesPromoted": true}
    },
    "Animal": {
      "parent": "Thing",
      "children": ["Cat", "Dog", "Horse"],
      "traits": ["alive"],
      "acquaintances": [],
      "type": "thing",
      "stages": {"childrenDone": true, "rawLogged": true, "traitsPromoted": true, "rolesPromoted": false}
    },
    "Object": {
      "parent": "Thing",
      "children": ["Tool"],
      "traits": [],
      "acquaintances": [],
      "type": "thing"
    },
    "Concept": {
      "parent": "Thing",
      "children": ["Theory"],
      "traits": [],
      "acquaintances": [],
      "type": "thing"
    },
    "System": {
      "parent": "Thing",
      "children": ["Political", "Economic"],
      "traits": [],
      "acquaintances": [],
      "type": "thing"
    },
    "Cat": {
      "parent": "Animal",
      "children": [],
      "traits": ["purrs"],
      "acquaintances": [],
      "type": "thing",
      "stages": {"rawLogged": false}
    },
    "Dog": {"parent": "Animal", "children": [], "traits": [], "acquaintances": ["Cat"]},
    "Horse": {"parent": "Animal", "children": [], "traits": [], "acquaintances": ["Economic"]},
    "Tool": {"parent": "Object", "children": [], "traits": [], "acquaintances": []},
    "Theory": {"parent": "Concept", "children": [], "traits": [], "acquaintances": []},
    "Political": {"parent": "System", "children": [], "traits": [], "acquaintances": []},
    "Economic": {"parent": "System", "children": [], "traits": [], "acquaintances": []},
    "Hermit": {"children": [], "traits": [], "acquaintances": []}
  }
}"#;

fn load_master() -> WordGraph {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("unified_master.json");
    std::fs::write(&path, MASTER).unwrap();
    WordGraph::load(&path).unwrap()
}

#[test]
fn loads_document_in_order() {
    let g = load_master();
    assert_eq!(g.len(), 13);
    assert_eq!(g.all_ids()[..3], ["Thing", "Animal", "Object"]);
    assert_eq!(g.get("Cat").unwrap().parent.as_deref(), Some("Animal"));
    assert!(g.get("Hermit").unwrap().is_root());
}

#[test]
fn every_word_reaches_itself() {
    let g = load_master();
    for id in g.ids() {
        assert_eq!(shortest_path(&g, id, id), Some(vec![id.to_string()]));
    }
}

#[test]
fn paths_are_simple_and_follow_neighbors() {
    let g = load_master();
    let ids = g.all_ids();
    for a in &ids {
        for b in &ids {
            let Some(path) = shortest_path(&g, a, b) else {
                continue;
            };
            assert_eq!(path.first().map(String::as_str), Some(*a));
            assert_eq!(path.last().map(String::as_str), Some(*b));
            let mut seen = std::collections::HashSet::new();
            assert!(path.iter().all(|w| seen.insert(w)), "repeat in {path:?}");
            // One direction only: a one-sided acquaintance is walkable from
            // the word that lists it, so `Economic` need not list `Horse`.
            for pair in path.windows(2) {
                assert!(
                    g.neighbors(&pair[0]).contains(&pair[1].as_str()),
                    "{} is not a neighbor of {}",
                    pair[1],
                    pair[0]
                );
            }
        }
    }
}

#[test]
fn children_classify_reciprocally() {
    let g = load_master();
    for entry in g.entries() {
        for child in &entry.children {
            assert_eq!(classify(&g, &entry.id, child).relation, Relation::ChildOf);
            assert_eq!(classify(&g, child, &entry.id).relation, Relation::ParentOf);
        }
    }
}

#[test]
fn sibling_example() {
    let g = load_master();
    assert_eq!(
        shortest_path(&g, "Cat", "Horse"),
        Some(vec!["Cat".into(), "Animal".into(), "Horse".into()])
    );
    assert_eq!(classify(&g, "Cat", "Animal").relation.label(), "parent-of");
    assert_eq!(
        classify(&g, "Cat", "Horse").relation,
        Relation::Sibling {
            parent: "Animal".into()
        }
    );
}

#[test]
fn unknown_and_isolated_words_have_no_path() {
    let g = load_master();
    assert_eq!(shortest_path(&g, "Cat", "Unicorn"), None);
    assert_eq!(shortest_path(&g, "Unicorn", "Cat"), None);
    assert_eq!(shortest_path(&g, "Hermit", "Thing"), None);
    assert_eq!(shortest_path(&g, "Thing", "Hermit"), None);
}

#[test]
fn cat_to_political_runs_through_the_connector() {
    let g = load_master();
    let config = AnalysisConfig::default();
    let path = shortest_path(&g, "Cat", "Political").unwrap();
    assert_eq!(path, ["Cat", "Animal", "Thing", "System", "Political"]);

    let score = score_path(&g, &path, &config);
    assert_eq!(score.score, 100);
    assert!(score.strengths.iter().any(|s| s.contains("universal connector")));
    assert_eq!(score.verdict(&config.scoring), Verdict::Valid);
    assert_eq!(score, score_path(&g, &path, &config));
}

#[test]
fn acquaintance_shortcut_costs_a_gap_penalty() {
    let g = load_master();
    let config = AnalysisConfig::default();
    let path = shortest_path(&g, "Horse", "Economic").unwrap();
    assert_eq!(path, ["Horse", "Economic"]);
    let score = score_path(&g, &path, &config);
    assert_eq!(score.score, 80);
    assert_eq!(score.issues.len(), 1);
}

#[test]
fn probe_explains_path() {
    let g = load_master();
    let config = AnalysisConfig::default();
    let result = probe(&g, &PathFinder::new(), &config.heuristics, "Tool", "Theory");
    assert_eq!(
        result.path.as_deref().unwrap(),
        ["Tool", "Object", "Thing", "Concept", "Theory"]
    );
    assert_eq!(result.steps.len(), 4);
    assert_eq!(result.steps[3].description, "Theory is a child/subtype of Concept");
    assert!(result.issues.is_empty());
}

#[test]
fn evaluate_default_pairs() {
    let g = load_master();
    let config = AnalysisConfig::default();
    let pairs: Vec<(String, String)> = [("Cat", "Political"), ("Horse", "Economic"), ("Cat", "Hermit")]
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();
    let results = score_pairs(&g, &PathFinder::new(), &config, &pairs);
    let found: Vec<_> = results.iter().filter_map(|r| r.score.clone()).collect();
    assert_eq!(found.len(), 2);

    let summary = evaluate(&found, &config.scoring);
    assert_eq!(summary.total_paths, 2);
    assert_eq!(summary.valid_paths, 2);
    assert!((summary.average_score - 90.0).abs() < 1e-9);
}

#[test]
fn audit_of_loaded_document() {
    let g = load_master();
    let report = audit(&g, &AnalysisConfig::default().heuristics);

    assert!(report.is_consistent(), "{:?}", report.integrity_violations);
    assert_eq!(report.total_words, 13);
    assert_eq!(report.category_counts["Animal"], 3);
    assert_eq!(report.category_counts["root"], 2);
    assert!(report.suspicious_leaves.iter().any(|l| l.word == "Cat"));
    assert_eq!(report.processing.fully_processed, 1);
    assert_eq!(report.processing.partially_processed, 1);
    assert_eq!(report.depth_by_level[&2].len(), 7);
    assert_eq!(report.connectivity.isolated, vec!["Hermit"]);
    assert_eq!(report.connectivity.detached_from_connector, vec!["Hermit"]);
}

#[test]
fn audit_reports_each_self_reference_once() {
    let g = WordGraph::from_json_str(
        r#"{"master_words": {
            "Echo": {"children": ["Echo"], "traits": [], "acquaintances": ["Echo"]}
        }}"#,
    )
    .unwrap();
    let report = audit(&g, &AnalysisConfig::default().heuristics);
    let self_child = report
        .integrity_violations
        .iter()
        .filter(|v| matches!(v, IntegrityViolation::SelfChild { .. }))
        .count();
    let self_acq = report
        .integrity_violations
        .iter()
        .filter(|v| matches!(v, IntegrityViolation::SelfAcquaintance { .. }))
        .count();
    assert_eq!((self_child, self_acq), (1, 1));
    // Self-links never become a path step.
    assert!(g.neighbors("Echo").is_empty());
}

#[test]
fn config_file_changes_scoring() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("six-degrees.toml");
    std::fs::write(
        &path,
        r#"
        [scoring]
        gap_penalty = 50

        [[heuristics.semantic_gaps]]
        from = ["Horse"]
        to = ["Economic"]
        "#,
    )
    .unwrap();
    let config = AnalysisConfig::load(&path).unwrap();
    let g = load_master();
    let score = score_path(&g, &["Horse", "Economic"], &config);
    assert_eq!(score.score, 50);
    assert_eq!(score.verdict(&config.scoring), Verdict::Flagged);
}

#[test]
fn malformed_document_is_an_error() {
    let err = WordGraph::from_json_str(r#"{"master_words": {"Cat": {"parent": "Animal"}}}"#)
        .unwrap_err();
    assert!(matches!(err, GraphError::MalformedDocument { .. }));

    let missing = WordGraph::load(std::path::Path::new("/nonexistent/master.json")).unwrap_err();
    let top: SixDegreesError = missing.into();
    assert!(matches!(top, SixDegreesError::Graph(GraphError::Io { .. })));
}

#[test]
fn graph_is_shared_across_threads() {
    let g = Arc::new(load_master());
    let handles: Vec<_> = ["Political", "Economic", "Theory", "Tool"]
        .into_iter()
        .map(|end| {
            let g = Arc::clone(&g);
            std::thread::spawn(move || shortest_path(&g, "Cat", end).map(|p| p.len()))
        })
        .collect();
    let lengths: Vec<Option<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(lengths, vec![Some(5), Some(4), Some(5), Some(5)]);
}
