//! Analysis configuration.
//!
//! Every heuristic word list lives in [`HeuristicTables`] rather than in the
//! algorithms, so the tables can be tuned from a TOML file or replaced in
//! tests. `Default` reproduces the built-in tables.
//!
//! ```toml
//! [heuristics]
//! universal_connector = "Thing"
//! concrete_words = ["Cat", "Dog"]
//!
//! [[heuristics.semantic_gaps]]
//! from = ["Cat"]
//! to = ["Political"]
//!
//! [scoring]
//! gap_penalty = 25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// A category and the words that belong under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
    pub category: String,
    pub members: Vec<String>,
}

impl WordGroup {
    pub fn new(category: &str, members: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            members: strings(members),
        }
    }
}

/// A direct step from any `from` word to any `to` word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub from: Vec<String>,
    pub to: Vec<String>,
}

impl TransitionRule {
    pub fn new(from: &[&str], to: &[&str]) -> Self {
        Self {
            from: strings(from),
            to: strings(to),
        }
    }

    pub fn matches(&self, from: &str, to: &str) -> bool {
        contains(&self.from, from) && contains(&self.to, to)
    }
}

/// Fixed word tables behind the scoring and audit heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicTables {
    /// Root word whose presence in a path counts as a strength.
    pub universal_connector: String,
    /// Direct divisions of the connector; steps into them have distance 1.
    pub connector_divisions: Vec<String>,
    /// Type tag marking taxonomic things for cross-category jump checks.
    pub thing_type: String,
    pub concrete_words: Vec<String>,
    pub abstract_words: Vec<String>,
    /// Only words in `abstract_words` end a concrete-to-abstract bridge.
    /// When off, any end word outside `concrete_words` counts as abstract.
    pub strict_abstract_end: bool,
    /// Words expected to have children.
    pub suspicious_leaves: Vec<String>,
    /// First-step pairs `member → category` reported as natural.
    pub natural_pairs: Vec<WordGroup>,
    /// Concrete-to-abstract skips that cost score.
    pub semantic_gaps: Vec<TransitionRule>,
    /// Major categories and the subtypes expected under them.
    pub major_categories: Vec<WordGroup>,
    /// Category pairs whose direct, non-associative jump looks illogical.
    /// Each side matches either the word itself or its parent.
    pub category_jumps: Vec<TransitionRule>,
}

impl Default for HeuristicTables {
    fn default() -> Self {
        Self {
            universal_connector: "Thing".into(),
            connector_divisions: strings(&["System", "Concept", "Object"]),
            thing_type: "thing".into(),
            concrete_words: strings(&[
                "Cat", "Dog", "Fish", "Horse", "Tool", "Vehicle", "Furniture",
            ]),
            abstract_words: strings(&[
                "Political", "Economic", "Theory", "Belief", "Concept", "System",
            ]),
            strict_abstract_end: false,
            suspicious_leaves: strings(&[
                "Cat", "Dog", "Bird", "Fish", "Horse", "Furniture", "Vehicle", "Tool",
                "Container", "Device", "Theory", "Belief", "Principle", "Value", "Solar",
                "Digestive", "Computer", "Economic", "Political",
            ]),
            natural_pairs: vec![
                WordGroup::new("Animal", &["Cat", "Dog", "Fish", "Horse"]),
                WordGroup::new("Object", &["Tool", "Vehicle", "Furniture"]),
            ],
            semantic_gaps: vec![
                TransitionRule::new(&["Cat", "Fish", "Horse"], &["Political", "Economic"]),
                TransitionRule::new(&["Tool", "Vehicle", "Furniture"], &["Theory", "Belief"]),
            ],
            major_categories: vec![
                WordGroup::new("Animal", &["Cat", "Dog", "Bird", "Fish", "Horse"]),
                WordGroup::new("Object", &["Furniture", "Vehicle", "Tool", "Container", "Device"]),
                WordGroup::new("Concept", &["Theory", "Belief", "Principle", "Value"]),
                WordGroup::new("System", &["Solar", "Digestive", "Computer", "Political"]),
            ],
            category_jumps: vec![
                TransitionRule::new(&["Animal"], &["System"]),
                TransitionRule::new(&["Animal"], &["Concept"]),
                TransitionRule::new(&["Object"], &["System"]),
            ],
        }
    }
}

impl HeuristicTables {
    pub fn is_concrete(&self, word: &str) -> bool {
        contains(&self.concrete_words, word)
    }

    pub fn is_abstract(&self, word: &str) -> bool {
        contains(&self.abstract_words, word)
    }

    /// `word` can end a path bridging from concrete to abstract.
    pub fn ends_abstract(&self, word: &str) -> bool {
        if self.strict_abstract_end {
            self.is_abstract(word)
        } else {
            !self.is_concrete(word)
        }
    }

    pub fn is_connector(&self, word: &str) -> bool {
        self.universal_connector == word
    }

    pub fn is_connector_division(&self, word: &str) -> bool {
        contains(&self.connector_divisions, word)
    }

    pub fn is_suspicious_leaf(&self, word: &str) -> bool {
        contains(&self.suspicious_leaves, word)
    }

    /// `member → category` is a listed natural taxonomic pair.
    pub fn is_natural_pair(&self, member: &str, category: &str) -> bool {
        self.natural_pairs
            .iter()
            .any(|g| g.category == category && contains(&g.members, member))
    }

    /// `from → to` skips straight from a concrete word to an abstract one.
    pub fn is_semantic_gap(&self, from: &str, to: &str) -> bool {
        self.semantic_gaps.iter().any(|r| r.matches(from, to))
    }
}

/// Score arithmetic and verdict thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub initial_score: i32,
    /// Subtracted once per step matching a semantic-gap rule.
    pub gap_penalty: i32,
    /// Lowest score judged `Valid`.
    pub valid_threshold: i32,
    /// Lowest score judged `Acceptable`.
    pub acceptable_threshold: i32,
    /// Minimum repeats before an issue kind counts as common.
    pub common_issue_min: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_score: 100,
            gap_penalty: 20,
            valid_threshold: 80,
            acceptable_threshold: 60,
            common_issue_min: 2,
        }
    }
}

/// Path search limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Give up after visiting this many words. Unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visited: Option<usize>,
}

/// Complete configuration for an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub search: SearchConfig,
    pub scoring: ScoringConfig,
    pub heuristics: HeuristicTables,
}

impl AnalysisConfig {
    /// Load from a TOML file. Missing tables and keys take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded analysis config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }

    /// Reject settings the analyses cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.heuristics.universal_connector.is_empty() {
            return Err(ConfigError::Invalid {
                message: "heuristics.universal_connector must not be empty".into(),
            });
        }
        if self.scoring.gap_penalty < 0 {
            return Err(ConfigError::Invalid {
                message: "scoring.gap_penalty must be >= 0".into(),
            });
        }
        if self.scoring.acceptable_threshold > self.scoring.valid_threshold {
            return Err(ConfigError::Invalid {
                message: "scoring.acceptable_threshold must not exceed scoring.valid_threshold"
                    .into(),
            });
        }
        if self.search.max_visited == Some(0) {
            return Err(ConfigError::Invalid {
                message: "search.max_visited must be > 0".into(),
            });
        }
        Ok(())
    }
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn contains(words: &[String], word: &str) -> bool {
    words.iter().any(|w| w == word)
}
