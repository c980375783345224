use serde::{Deserialize, Serialize};

use crate::scoring::{Competitor, ScoreBounds, ScoreDimension, ScoreboardInput};

/// One comparison page's scoreboard as authored in YAML.
///
/// Example:
/// ```yaml
/// title: Zoho Desk vs Zendesk
/// bounds: { min: 0, max: 10 }
/// competitors:
///   - { key: zoho desk, display_name: Zoho Desk }
///   - { key: zendesk, display_name: Zendesk }
/// dimensions:
///   - label: Ease of use
///     scores: { zoho desk: 9.0, zendesk: 8.5 }
/// ```
///
/// Empty or absent lists are accepted here and rejected by the aggregator,
/// so authors get the same error either way.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreboardDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Overrides the configured bounds for this document only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ScoreBounds>,

    #[serde(default)]
    pub competitors: Vec<Competitor>,

    #[serde(default)]
    pub dimensions: Vec<ScoreDimension>,
}

/// A score entry naming a key that is not a declared competitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraScore {
    pub dimension: String,
    pub key: String,
}

impl ScoreboardDocument {
    pub fn input(&self) -> ScoreboardInput {
        ScoreboardInput {
            competitors: self.competitors.clone(),
            dimensions: self.dimensions.clone(),
        }
    }

    /// Bounds to validate against: the document's own, else `fallback`
    pub fn effective_bounds(&self, fallback: ScoreBounds) -> ScoreBounds {
        self.bounds.unwrap_or(fallback)
    }

    pub fn competitor(&self, key: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.key == key)
    }

    /// Display name for `key`, or the key itself if undeclared
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.competitor(key).map(|c| c.name()).unwrap_or(key)
    }

    /// Score entries the aggregator will never read, usually a typo in a key.
    /// Sorted within each dimension so the report is stable.
    pub fn extra_score_keys(&self) -> Vec<ExtraScore> {
        let mut extras = Vec::new();
        for dimension in &self.dimensions {
            let mut keys: Vec<&String> = dimension
                .scores
                .keys()
                .filter(|k| self.competitor(k).is_none())
                .collect();
            keys.sort();
            extras.extend(keys.into_iter().map(|key| ExtraScore {
                dimension: dimension.label.clone(),
                key: key.clone(),
            }));
        }
        extras
    }
}
