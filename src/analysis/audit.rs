//! Structural audit of the whole word graph.
//!
//! Two families of findings:
//! 1. Completeness: leaves that should have children, words without traits
//!    or acquaintances, unfinished processing stages, depth per level.
//! 2. Integrity: self-references, parent/child back-links that disagree,
//!    references to words that do not exist, parent cycles.
//!
//! Each finding is an independent pass over all entries. Passes never fail;
//! a defective entry is reported and the scan moves on. Every list is sorted
//! by word so reports are reproducible.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexSet;
use serde::Serialize;

use crate::config::HeuristicTables;
use crate::graph::WordGraph;
use crate::graph::analytics::{Connectivity, connectivity};
use crate::word::{Stage, WordEntry};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A word expected to have children that has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspiciousLeaf {
    pub word: String,
    pub parent: Option<String>,
}

/// A word with at least one stage still set to false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteEntry {
    pub word: String,
    /// Incomplete stage names in document order.
    pub incomplete_stages: Vec<String>,
    pub has_children: bool,
    pub has_traits: bool,
    pub has_acquaintances: bool,
}

/// Words sharing the same set of incomplete stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompletePattern {
    /// Sorted stage names.
    pub missing: Vec<String>,
    pub words: Vec<String>,
}

/// Words carrying exactly the same stage flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePattern {
    /// Known stages in canonical order, then any others by name.
    pub stages: Vec<(String, bool)>,
    pub words: Vec<String>,
}

impl StagePattern {
    /// `"childrenDone:true, rawLogged:false"`.
    pub fn label(&self) -> String {
        self.stages
            .iter()
            .map(|(name, done)| format!("{name}:{done}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Subtypes of a major category that share a shortcoming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGap {
    pub category: String,
    pub words: Vec<String>,
}

/// Which relation field a reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefField {
    Parent,
    Children,
    Acquaintances,
}

impl std::fmt::Display for RefField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefField::Parent => write!(f, "parent"),
            RefField::Children => write!(f, "children"),
            RefField::Acquaintances => write!(f, "acquaintances"),
        }
    }
}

/// A structural defect. Never auto-repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// The word lists itself among its children.
    SelfChild { word: String },
    /// The word lists itself among its acquaintances.
    SelfAcquaintance { word: String },
    /// `parent` lists `child`, but `child` records another parent (or none).
    ParentMismatch {
        parent: String,
        child: String,
        recorded_parent: Option<String>,
    },
    /// `child` records `parent`, but `parent` does not list it.
    ChildNotListed { parent: String, child: String },
    /// A relation points at a word that does not exist.
    DanglingReference {
        word: String,
        field: RefField,
        target: String,
    },
    /// Words whose parent links form a loop, sorted.
    ParentCycle { members: Vec<String> },
}

impl IntegrityViolation {
    /// The word the violation is filed under.
    pub fn word(&self) -> &str {
        match self {
            Self::SelfChild { word }
            | Self::SelfAcquaintance { word }
            | Self::DanglingReference { word, .. } => word,
            Self::ParentMismatch { parent, .. } => parent,
            Self::ChildNotListed { child, .. } => child,
            Self::ParentCycle { members } => members.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::SelfChild { word } => format!("{word} appears as its own child"),
            Self::SelfAcquaintance { word } => format!("{word} appears as its own acquaintance"),
            Self::ParentMismatch {
                parent,
                child,
                recorded_parent,
            } => format!(
                "{child} lists parent as {}, not {parent}",
                recorded_parent.as_deref().unwrap_or("nothing")
            ),
            Self::ChildNotListed { parent, child } => {
                format!("{child} lists parent as {parent}, but {parent} does not list it as a child")
            }
            Self::DanglingReference {
                word,
                field,
                target,
            } => format!("{word} references unknown word {target} in {field}"),
            Self::ParentCycle { members } => {
                format!("parent links form a cycle: {}", members.join(", "))
            }
        }
    }
}

/// Counts of words by how far through processing they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
    /// `childrenDone`, `rawLogged`, `traitsPromoted` and `rolesPromoted` all set.
    pub fully_processed: usize,
    /// The first three set, `rolesPromoted` not.
    pub partially_processed: usize,
    pub unprocessed: usize,
    /// Counted here instead of in the buckets above.
    pub orphan_adopted: usize,
}

/// Every finding of one audit run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub total_words: usize,
    /// Words per parent; parentless words count under `root`.
    pub category_counts: BTreeMap<String, usize>,
    pub suspicious_leaves: Vec<SuspiciousLeaf>,
    /// Parent → words without traits.
    pub trait_empty: BTreeMap<String, Vec<String>>,
    /// Parent → words without acquaintances.
    pub acquaintance_empty: BTreeMap<String, Vec<String>>,
    pub incomplete_stage_entries: Vec<IncompleteEntry>,
    pub incomplete_patterns: Vec<IncompletePattern>,
    /// Sorted by word count desc, then by pattern.
    pub stage_patterns: Vec<StagePattern>,
    pub orphan_adopted: Vec<String>,
    pub processing: ProcessingSummary,
    /// Major categories whose listed subtypes have no children.
    pub major_category_gaps: Vec<CategoryGap>,
    /// Major categories whose listed subtypes are not `rawLogged`.
    pub unprocessed_subtypes: Vec<CategoryGap>,
    /// Parent hops to a root, per word. Words whose ascent loops are absent.
    pub depth_by_word: BTreeMap<String, usize>,
    /// Depth → words.
    pub depth_by_level: BTreeMap<usize, Vec<String>>,
    /// Words whose parent ascent runs into a cycle.
    pub cyclic_ancestry: Vec<String>,
    pub integrity_violations: Vec<IntegrityViolation>,
    pub connectivity: Connectivity,
}

impl AuditReport {
    pub fn trait_empty_count(&self) -> usize {
        self.trait_empty.values().map(Vec::len).sum()
    }

    pub fn acquaintance_empty_count(&self) -> usize {
        self.acquaintance_empty.values().map(Vec::len).sum()
    }

    pub fn is_consistent(&self) -> bool {
        self.integrity_violations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Run every audit pass over the graph.
pub fn audit(graph: &WordGraph, tables: &HeuristicTables) -> AuditReport {
    let sorted = sorted_entries(graph);
    let depths = ascend_all(graph, &sorted);

    let mut depth_by_level: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (word, depth) in &depths.depth_by_word {
        depth_by_level.entry(*depth).or_default().push(word.clone());
    }

    let mut integrity_violations = integrity_pass(graph, &sorted);
    integrity_violations.extend(
        depths
            .cycles
            .into_iter()
            .map(|members| IntegrityViolation::ParentCycle { members }),
    );

    let incomplete_stage_entries = incomplete_entries(&sorted);

    let report = AuditReport {
        total_words: graph.len(),
        category_counts: category_counts(&sorted),
        suspicious_leaves: suspicious_leaves(&sorted, tables),
        trait_empty: group_by_category(&sorted, |e| e.traits.is_empty()),
        acquaintance_empty: group_by_category(&sorted, |e| e.acquaintances.is_empty()),
        incomplete_patterns: incomplete_patterns(&incomplete_stage_entries),
        incomplete_stage_entries,
        stage_patterns: stage_patterns(&sorted),
        orphan_adopted: sorted
            .iter()
            .filter(|e| e.stage_done(Stage::OrphanAdopted))
            .map(|e| e.id.clone())
            .collect(),
        processing: processing_summary(&sorted),
        major_category_gaps: category_gaps(graph, tables, |e| e.children.is_empty()),
        unprocessed_subtypes: category_gaps(graph, tables, |e| !e.stage_done(Stage::RawLogged)),
        depth_by_word: depths.depth_by_word,
        depth_by_level,
        cyclic_ancestry: depths.cyclic,
        integrity_violations,
        connectivity: connectivity(graph, &tables.universal_connector),
    };

    tracing::info!(
        words = report.total_words,
        suspicious_leaves = report.suspicious_leaves.len(),
        incomplete = report.incomplete_stage_entries.len(),
        violations = report.integrity_violations.len(),
        "audit complete"
    );
    report
}

fn sorted_entries(graph: &WordGraph) -> Vec<&WordEntry> {
    let mut entries: Vec<&WordEntry> = graph.entries().collect();
    entries.sort_by(|a, b| a.id.cmp(&b.id));
    entries
}

fn category_counts(entries: &[&WordEntry]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for e in entries {
        *counts.entry(e.category().to_string()).or_insert(0) += 1;
    }
    counts
}

fn suspicious_leaves(entries: &[&WordEntry], tables: &HeuristicTables) -> Vec<SuspiciousLeaf> {
    entries
        .iter()
        .filter(|e| e.children.is_empty() && tables.is_suspicious_leaf(&e.id))
        .map(|e| SuspiciousLeaf {
            word: e.id.clone(),
            parent: e.parent.clone(),
        })
        .collect()
}

fn group_by_category(
    entries: &[&WordEntry],
    pred: impl Fn(&WordEntry) -> bool,
) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for e in entries.iter().filter(|e| pred(e)) {
        groups
            .entry(e.category().to_string())
            .or_default()
            .push(e.id.clone());
    }
    groups
}

fn incomplete_entries(entries: &[&WordEntry]) -> Vec<IncompleteEntry> {
    entries
        .iter()
        .filter_map(|e| {
            let incomplete_stages = e.incomplete_stages();
            (!incomplete_stages.is_empty()).then(|| IncompleteEntry {
                word: e.id.clone(),
                incomplete_stages,
                has_children: !e.children.is_empty(),
                has_traits: !e.traits.is_empty(),
                has_acquaintances: !e.acquaintances.is_empty(),
            })
        })
        .collect()
}

fn incomplete_patterns(incomplete: &[IncompleteEntry]) -> Vec<IncompletePattern> {
    let mut groups: BTreeMap<Vec<String>, Vec<String>> = BTreeMap::new();
    for item in incomplete {
        let mut missing = item.incomplete_stages.clone();
        missing.sort();
        groups.entry(missing).or_default().push(item.word.clone());
    }
    groups
        .into_iter()
        .map(|(missing, words)| IncompletePattern { missing, words })
        .collect()
}

/// Stage flags in reporting order: known stages first, canonically, then
/// unrecognized names alphabetically.
fn stage_signature(entry: &WordEntry) -> Vec<(String, bool)> {
    let mut known: Vec<(Stage, bool)> = Vec::new();
    let mut other: Vec<(String, bool)> = Vec::new();
    for (name, done) in &entry.stages {
        match Stage::from_key(name) {
            Some(stage) => known.push((stage, *done)),
            None => other.push((name.clone(), *done)),
        }
    }
    known.sort();
    other.sort();
    known
        .into_iter()
        .map(|(stage, done)| (stage.as_str().to_string(), done))
        .chain(other)
        .collect()
}

fn stage_patterns(entries: &[&WordEntry]) -> Vec<StagePattern> {
    let mut groups: BTreeMap<Vec<(String, bool)>, Vec<String>> = BTreeMap::new();
    for e in entries {
        groups.entry(stage_signature(e)).or_default().push(e.id.clone());
    }
    let mut patterns: Vec<StagePattern> = groups
        .into_iter()
        .map(|(stages, words)| StagePattern { stages, words })
        .collect();
    // Stable sort keeps the map's pattern order among equal counts.
    patterns.sort_by(|a, b| b.words.len().cmp(&a.words.len()));
    patterns
}

fn processing_summary(entries: &[&WordEntry]) -> ProcessingSummary {
    let mut summary = ProcessingSummary::default();
    for e in entries {
        let core_done = [Stage::ChildrenDone, Stage::RawLogged, Stage::TraitsPromoted]
            .into_iter()
            .all(|s| e.stage_done(s));
        if e.stage_done(Stage::OrphanAdopted) {
            summary.orphan_adopted += 1;
        } else if core_done && e.stage_done(Stage::RolesPromoted) {
            summary.fully_processed += 1;
        } else if core_done {
            summary.partially_processed += 1;
        } else {
            summary.unprocessed += 1;
        }
    }
    summary
}

/// Per major category, listed subtypes present in the graph matching `pred`.
fn category_gaps(
    graph: &WordGraph,
    tables: &HeuristicTables,
    pred: impl Fn(&WordEntry) -> bool,
) -> Vec<CategoryGap> {
    tables
        .major_categories
        .iter()
        .filter_map(|group| {
            let words: Vec<String> = group
                .members
                .iter()
                .filter_map(|m| graph.get(m))
                .filter(|e| pred(e))
                .map(|e| e.id.clone())
                .collect();
            (!words.is_empty()).then(|| CategoryGap {
                category: group.category.clone(),
                words,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Integrity
// ---------------------------------------------------------------------------

fn integrity_pass(graph: &WordGraph, entries: &[&WordEntry]) -> Vec<IntegrityViolation> {
    let mut out = Vec::new();

    for e in entries {
        let word = e.id.as_str();

        if e.has_child(word) {
            out.push(IntegrityViolation::SelfChild { word: word.into() });
        }
        if e.has_acquaintance(word) {
            out.push(IntegrityViolation::SelfAcquaintance { word: word.into() });
        }

        if let Some(parent) = e.parent.as_deref() {
            match graph.get(parent) {
                None => out.push(IntegrityViolation::DanglingReference {
                    word: word.into(),
                    field: RefField::Parent,
                    target: parent.into(),
                }),
                Some(p) if parent != word && !p.has_child(word) => {
                    out.push(IntegrityViolation::ChildNotListed {
                        parent: parent.into(),
                        child: word.into(),
                    })
                }
                Some(_) => {}
            }
        }

        for child in e.children.iter().filter(|c| c.as_str() != word) {
            match graph.get(child) {
                None => out.push(IntegrityViolation::DanglingReference {
                    word: word.into(),
                    field: RefField::Children,
                    target: child.clone(),
                }),
                Some(c) if c.parent.as_deref() != Some(word) => {
                    out.push(IntegrityViolation::ParentMismatch {
                        parent: word.into(),
                        child: child.clone(),
                        recorded_parent: c.parent.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        for target in e.acquaintances.iter().filter(|a| a.as_str() != word) {
            if !graph.contains(target) {
                out.push(IntegrityViolation::DanglingReference {
                    word: word.into(),
                    field: RefField::Acquaintances,
                    target: target.clone(),
                });
            }
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

struct Depths {
    depth_by_word: BTreeMap<String, usize>,
    cyclic: Vec<String>,
    /// Distinct cycles, each sorted, in sorted order.
    cycles: Vec<Vec<String>>,
}

enum Ascent {
    /// Hops to a root. A parent missing from the graph ends the ascent
    /// after counting the hop to it.
    Depth(usize),
    /// The ascent revisited a word; the loop's members.
    Cycle(Vec<String>),
}

/// Climb parent links from `start`, stopping on the first repeated word.
fn ascend(graph: &WordGraph, start: &WordEntry) -> Ascent {
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut current = start;
    seen.insert(current.id.as_str());
    loop {
        let Some(parent) = current.parent.as_deref() else {
            return Ascent::Depth(seen.len() - 1);
        };
        if let Some(pos) = seen.get_index_of(parent) {
            let members = seen.iter().skip(pos).map(|w| w.to_string()).collect();
            return Ascent::Cycle(members);
        }
        match graph.get(parent) {
            Some(next) => {
                seen.insert(next.id.as_str());
                current = next;
            }
            None => return Ascent::Depth(seen.len()),
        }
    }
}

fn ascend_all(graph: &WordGraph, entries: &[&WordEntry]) -> Depths {
    let mut depth_by_word = BTreeMap::new();
    let mut cyclic = Vec::new();
    let mut cycles: BTreeSet<Vec<String>> = BTreeSet::new();

    for e in entries {
        match ascend(graph, e) {
            Ascent::Depth(d) => {
                depth_by_word.insert(e.id.clone(), d);
            }
            Ascent::Cycle(mut members) => {
                tracing::warn!(word = %e.id, "parent ascent runs into a cycle");
                members.sort();
                cycles.insert(members);
                cyclic.push(e.id.clone());
            }
        }
    }

    Depths {
        depth_by_word,
        cyclic,
        cycles: cycles.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_sample() -> WordGraph {
        WordGraph::from_entries([
            WordEntry::new("Thing")
                .with_children(["Animal", "Object"])
                .with_traits(["everything"])
                .with_acquaintances(["Universe"])
                .with_stage(Stage::ChildrenDone, true)
                .with_stage(Stage::RawLogged, true)
                .with_stage(Stage::TraitsPromoted, true)
                .with_stage(Stage::RolesPromoted, false),
            WordEntry::new("Animal")
                .with_parent("Thing")
                .with_children(["Cat", "Dog"])
                .with_traits(["alive"])
                .with_stage(Stage::ChildrenDone, true)
                .with_stage(Stage::RawLogged, true)
                .with_stage(Stage::TraitsPromoted, true)
                .with_stage(Stage::RolesPromoted, false),
            WordEntry::new("Object").with_parent("Thing").with_children(["Tool"]),
            WordEntry::new("Cat")
                .with_parent("Animal")
                .with_acquaintances(["Dog"])
                .with_stage(Stage::RawLogged, false),
            WordEntry::new("Dog").with_parent("Animal"),
            WordEntry::new("Tool")
                .with_parent("Object")
                .with_stage(Stage::OrphanAdopted, true),
            WordEntry::new("Universe"),
        ])
        .unwrap()
    }

    #[test]
    fn consistent_sample_has_no_violations() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        assert!(report.is_consistent(), "{:?}", report.integrity_violations);
        assert_eq!(report.total_words, 7);
    }

    #[test]
    fn suspicious_leaves_sorted() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        let words: Vec<&str> = report.suspicious_leaves.iter().map(|l| l.word.as_str()).collect();
        assert_eq!(words, vec!["Cat", "Dog", "Tool"]);
        assert_eq!(report.suspicious_leaves[0].parent.as_deref(), Some("Animal"));
    }

    #[test]
    fn empty_traits_and_acquaintances_grouped_by_parent() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        assert_eq!(report.trait_empty["Animal"], vec!["Cat", "Dog"]);
        assert_eq!(report.trait_empty["root"], vec!["Universe"]);
        assert_eq!(report.trait_empty_count(), 5);
        assert_eq!(report.acquaintance_empty["Animal"], vec!["Dog"]);
        assert_eq!(report.acquaintance_empty["root"], vec!["Universe"]);
        assert_eq!(report.acquaintance_empty_count(), 5);
    }

    #[test]
    fn incomplete_stages_and_patterns() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        let words: Vec<&str> = report
            .incomplete_stage_entries
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(words, vec!["Animal", "Cat", "Thing"]);
        assert_eq!(report.incomplete_stage_entries[1].incomplete_stages, vec!["rawLogged"]);
        assert!(report.incomplete_stage_entries[0].has_children);

        assert_eq!(report.incomplete_patterns.len(), 2);
        assert_eq!(report.incomplete_patterns[0].missing, vec!["rawLogged"]);
        assert_eq!(report.incomplete_patterns[1].words, vec!["Animal", "Thing"]);
    }

    #[test]
    fn stage_patterns_group_exact_flags() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        let top = &report.stage_patterns[0];
        // Object, Dog and Universe carry no stages at all.
        assert_eq!(top.words, vec!["Dog", "Object", "Universe"]);
        assert!(top.stages.is_empty());
        let partial = report
            .stage_patterns
            .iter()
            .find(|p| p.words == vec!["Animal", "Thing"])
            .unwrap();
        assert_eq!(
            partial.label(),
            "childrenDone:true, rawLogged:true, traitsPromoted:true, rolesPromoted:false"
        );
    }

    #[test]
    fn processing_buckets() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        assert_eq!(report.orphan_adopted, vec!["Tool"]);
        assert_eq!(
            report.processing,
            ProcessingSummary {
                fully_processed: 0,
                partially_processed: 2,
                unprocessed: 4,
                orphan_adopted: 1,
            }
        );
    }

    #[test]
    fn depth_levels() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        assert_eq!(report.depth_by_level[&0], vec!["Thing", "Universe"]);
        assert_eq!(report.depth_by_level[&1], vec!["Animal", "Object"]);
        assert_eq!(report.depth_by_level[&2], vec!["Cat", "Dog", "Tool"]);
        assert!(report.cyclic_ancestry.is_empty());
    }

    #[test]
    fn major_category_gaps() {
        let report = audit(&build_sample(), &HeuristicTables::default());
        assert_eq!(
            report.major_category_gaps,
            vec![
                CategoryGap {
                    category: "Animal".into(),
                    words: vec!["Cat".into(), "Dog".into()]
                },
                CategoryGap {
                    category: "Object".into(),
                    words: vec!["Tool".into()]
                },
            ]
        );
        assert_eq!(report.unprocessed_subtypes[0].words, vec!["Cat", "Dog"]);
    }

    #[test]
    fn self_references_reported_once_each() {
        let g = WordGraph::from_entries([WordEntry::new("Echo")
            .with_children(["Echo"])
            .with_acquaintances(["Echo"])])
        .unwrap();
        let report = audit(&g, &HeuristicTables::default());
        assert_eq!(
            report.integrity_violations,
            vec![
                IntegrityViolation::SelfChild {
                    word: "Echo".into()
                },
                IntegrityViolation::SelfAcquaintance {
                    word: "Echo".into()
                },
            ]
        );
        assert_eq!(report.integrity_violations[0].describe(), "Echo appears as its own child");
    }

    #[test]
    fn parent_child_disagreements_both_directions() {
        let g = WordGraph::from_entries([
            WordEntry::new("Animal").with_children(["Cat"]),
            WordEntry::new("Pet"),
            WordEntry::new("Cat").with_parent("Pet"),
        ])
        .unwrap();
        let report = audit(&g, &HeuristicTables::default());
        assert_eq!(
            report.integrity_violations,
            vec![
                IntegrityViolation::ParentMismatch {
                    parent: "Animal".into(),
                    child: "Cat".into(),
                    recorded_parent: Some("Pet".into()),
                },
                IntegrityViolation::ChildNotListed {
                    parent: "Pet".into(),
                    child: "Cat".into(),
                },
            ]
        );
        assert_eq!(
            report.integrity_violations[0].describe(),
            "Cat lists parent as Pet, not Animal"
        );
    }

    #[test]
    fn dangling_references_detected() {
        let g = WordGraph::from_entries([WordEntry::new("Cat")
            .with_parent("Animal")
            .with_children(["Kitten"])
            .with_acquaintances(["Yarn"])])
        .unwrap();
        let report = audit(&g, &HeuristicTables::default());
        let fields: Vec<RefField> = report
            .integrity_violations
            .iter()
            .map(|v| match v {
                IntegrityViolation::DanglingReference { field, .. } => *field,
                other => panic!("unexpected violation {other:?}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec![RefField::Parent, RefField::Children, RefField::Acquaintances]
        );
        // The hop to a missing parent still counts.
        assert_eq!(report.depth_by_word["Cat"], 1);
    }

    #[test]
    fn parent_cycle_terminates_and_is_reported_once() {
        let g = WordGraph::from_entries([
            WordEntry::new("A").with_parent("C").with_children(["B"]),
            WordEntry::new("B").with_parent("A").with_children(["C"]),
            WordEntry::new("C").with_parent("B").with_children(["A"]),
            WordEntry::new("D").with_parent("A"),
        ])
        .unwrap();
        let report = audit(&g, &HeuristicTables::default());
        let cycles: Vec<&IntegrityViolation> = report
            .integrity_violations
            .iter()
            .filter(|v| matches!(v, IntegrityViolation::ParentCycle { .. }))
            .collect();
        assert_eq!(
            cycles,
            vec![&IntegrityViolation::ParentCycle {
                members: vec!["A".into(), "B".into(), "C".into()]
            }]
        );
        assert_eq!(report.cyclic_ancestry, vec!["A", "B", "C", "D"]);
        assert!(report.depth_by_word.is_empty());
    }

    #[test]
    fn self_parent_is_a_cycle_not_a_link_mismatch() {
        let g = WordGraph::from_entries([WordEntry::new("Ouroboros").with_parent("Ouroboros")])
            .unwrap();
        let report = audit(&g, &HeuristicTables::default());
        assert_eq!(
            report.integrity_violations,
            vec![IntegrityViolation::ParentCycle {
                members: vec!["Ouroboros".into()]
            }]
        );
    }

    #[test]
    fn audit_is_deterministic() {
        let g = build_sample();
        let t = HeuristicTables::default();
        assert_eq!(audit(&g, &t), audit(&g, &t));
    }
}
