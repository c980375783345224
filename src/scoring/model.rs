use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One product being compared.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Competitor {
    /// Lowercase identifier, unique within a scoreboard
    pub key: String,

    /// Label for display only; never used in computation
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Competitor {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// Display name, falling back to the key
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }
}

/// One axis of comparison with a score per competitor key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreDimension {
    pub label: String,
    pub scores: HashMap<String, f64>,
}

impl ScoreDimension {
    pub fn new<K: Into<String>>(
        label: impl Into<String>,
        scores: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            label: label.into(),
            scores: scores.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Everything needed to rank one comparison.
///
/// Competitor order is meaningful: it is the display order and the
/// tie-break order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ScoreboardInput {
    pub competitors: Vec<Competitor>,
    pub dimensions: Vec<ScoreDimension>,
}

/// Exact and display-rounded mean for one competitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorAverage {
    pub key: String,
    /// Full-precision mean, used for ranking
    #[serde(skip)]
    pub exact: f64,
    /// Mean rounded to one decimal
    #[serde(rename = "average")]
    pub rounded: f64,
}

/// Per-competitor averages in competitor order.
///
/// Only produced from validated input, so it is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Averages {
    pub(crate) entries: Vec<CompetitorAverage>,
}

impl Averages {
    /// Rounded average for `key`
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entry(key).map(|a| a.rounded)
    }

    /// Unrounded average for `key`
    pub fn exact(&self, key: &str) -> Option<f64> {
        self.entry(key).map(|a| a.exact)
    }

    pub fn entry(&self, key: &str) -> Option<&CompetitorAverage> {
        self.entries.iter().find(|a| a.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompetitorAverage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Overall winner, recording whether input order had to break a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WinnerOutcome {
    /// Strictly highest average
    Clear { key: String },
    /// Several competitors share the highest average; `key` is the one
    /// listed first, `tied_with` the others in competitor order
    TieBroken { key: String, tied_with: Vec<String> },
}

impl WinnerOutcome {
    pub fn key(&self) -> &str {
        match self {
            WinnerOutcome::Clear { key } | WinnerOutcome::TieBroken { key, .. } => key,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, WinnerOutcome::TieBroken { .. })
    }
}

/// Winner of a single dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionWinner {
    Sole(String),
    /// Two or more competitors share the top score, in competitor order
    Tie(Vec<String>),
}

impl DimensionWinner {
    /// Winner key, or None for a tie
    pub fn sole(&self) -> Option<&str> {
        match self {
            DimensionWinner::Sole(key) => Some(key),
            DimensionWinner::Tie(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionOutcome {
    pub label: String,
    pub winner: DimensionWinner,
}

/// Everything derived from one `ScoreboardInput`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardResult {
    pub averages: Averages,
    pub winner: WinnerOutcome,
    pub per_dimension_winners: Vec<DimensionOutcome>,
}
