//! Word entries: the nodes of the word graph.
//!
//! A [`WordEntry`] is keyed by the word itself and carries at most one
//! taxonomic parent, an ordered set of children, free-text traits,
//! associative acquaintances, an optional type tag and a map of processing
//! [`Stage`] flags. [`WordRecord`] is the on-disk shape the loader parses;
//! [`WordEntry::from_record`] normalizes it so downstream code never branches
//! on a missing field.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Processing milestones a word passes through while the graph is built.
///
/// The canonical order below is the order stage patterns are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    ChildrenDone,
    RawLogged,
    TraitsPromoted,
    RolesPromoted,
    OrphanAdopted,
}

impl Stage {
    /// All known stages, in canonical order.
    pub const ALL: [Stage; 5] = [
        Stage::ChildrenDone,
        Stage::RawLogged,
        Stage::TraitsPromoted,
        Stage::RolesPromoted,
        Stage::OrphanAdopted,
    ];

    /// The key used for this stage in word documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ChildrenDone => "childrenDone",
            Stage::RawLogged => "rawLogged",
            Stage::TraitsPromoted => "traitsPromoted",
            Stage::RolesPromoted => "rolesPromoted",
            Stage::OrphanAdopted => "orphanAdopted",
        }
    }

    /// Look up a stage by its document key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word record exactly as it appears under `master_words`.
///
/// `children`, `traits` and `acquaintances` are required; a record without
/// them is rejected at load time rather than silently treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default)]
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub traits: Vec<String>,
    pub acquaintances: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub stages: IndexMap<String, bool>,
}

/// One node in the word graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordEntry {
    /// The word, which is also its key.
    pub id: String,
    /// Taxonomic parent; `None` for roots.
    pub parent: Option<String>,
    /// Taxonomic children, duplicates removed, load order kept.
    pub children: Vec<String>,
    /// Free-text descriptive traits.
    pub traits: Vec<String>,
    /// Associative links. May be recorded on one side only.
    pub acquaintances: Vec<String>,
    /// Optional classification tag (e.g. `"thing"`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Processing stage flags, in document order.
    pub stages: IndexMap<String, bool>,
}

impl WordEntry {
    /// Create an empty root entry.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            traits: Vec::new(),
            acquaintances: Vec::new(),
            kind: None,
            stages: IndexMap::new(),
        }
    }

    /// Normalize a parsed record into an entry.
    ///
    /// An empty-string parent counts as no parent. Duplicate children,
    /// traits and acquaintances are dropped, keeping the first occurrence.
    pub fn from_record(id: impl Into<String>, record: WordRecord) -> Self {
        Self {
            id: id.into(),
            parent: record.parent.filter(|p| !p.is_empty()),
            children: dedup(record.children),
            traits: dedup(record.traits),
            acquaintances: dedup(record.acquaintances),
            kind: record.kind,
            stages: record.stages,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = dedup(children.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_traits<I, S>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.traits = dedup(traits.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_acquaintances<I, S>(mut self, acquaintances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acquaintances = dedup(acquaintances.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_stage(mut self, stage: Stage, done: bool) -> Self {
        self.stages.insert(stage.as_str().to_string(), done);
        self
    }

    /// Whether this entry has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent or the pseudo-category `"root"`, for grouping in reports.
    pub fn category(&self) -> &str {
        self.parent.as_deref().unwrap_or(ROOT_CATEGORY)
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.iter().any(|c| c == id)
    }

    pub fn has_acquaintance(&self, id: &str) -> bool {
        self.acquaintances.iter().any(|a| a == id)
    }

    pub fn is_type(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    /// Flag for a known stage, `None` if the entry does not carry it.
    pub fn stage(&self, stage: Stage) -> Option<bool> {
        self.stages.get(stage.as_str()).copied()
    }

    /// True only when the stage is present and set.
    pub fn stage_done(&self, stage: Stage) -> bool {
        self.stage(stage).unwrap_or(false)
    }

    /// Names of stages present but not completed, in document order.
    pub fn incomplete_stages(&self) -> Vec<String> {
        self.stages
            .iter()
            .filter(|(_, done)| !**done)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Category label used for entries without a parent.
pub const ROOT_CATEGORY: &str = "root";

fn dedup(items: Vec<String>) -> Vec<String> {
    items.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
