use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_MAX_SCORE: f64 = 10.0;

/// Closed interval every dimension score must fall within.
///
/// Example YAML:
/// ```yaml
/// bounds:
///   min: 0
///   max: 10
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoreBounds {
    #[serde(default = "default_min")]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_min() -> f64 {
    DEFAULT_MIN_SCORE
}

fn default_max() -> f64 {
    DEFAULT_MAX_SCORE
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SCORE,
            max: DEFAULT_MAX_SCORE,
        }
    }
}

impl ScoreBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True for finite scores inside `[min, max]`. NaN and infinities never pass.
    pub fn contains(&self, score: f64) -> bool {
        score.is_finite() && score >= self.min && score <= self.max
    }

    /// Check the bounds themselves. Returns all problems at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.min.is_finite() {
            errors.push(format!("bounds.min: must be finite, got {}", self.min));
        }
        if !self.max.is_finite() {
            errors.push(format!("bounds.max: must be finite, got {}", self.max));
        }
        if errors.is_empty() && self.min >= self.max {
            errors.push(format!(
                "bounds: min ({}) must be less than max ({})",
                self.min, self.max
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
