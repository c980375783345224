/// Structural problems in a scoreboard that stop aggregation.
///
/// Each variant names the first offending dimension/competitor so an author
/// can find the bad literal without re-reading the whole document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreboardError {
    #[error("scoreboard has no {missing}")]
    EmptyInput { missing: EmptyPart },

    #[error("competitor key '{key}' is declared more than once")]
    DuplicateCompetitor { key: String },

    #[error("dimension '{dimension}' has no score for competitor '{competitor}'")]
    MissingScore {
        dimension: String,
        competitor: String,
    },

    #[error(
        "dimension '{dimension}' scores competitor '{competitor}' at {score}, outside [{min}, {max}]"
    )]
    ScoreOutOfRange {
        dimension: String,
        competitor: String,
        score: f64,
        min: f64,
        max: f64,
    },
}

/// Which half of the input was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPart {
    Competitors,
    Dimensions,
}

impl std::fmt::Display for EmptyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyPart::Competitors => write!(f, "competitors"),
            EmptyPart::Dimensions => write!(f, "dimensions"),
        }
    }
}

impl ScoreboardError {
    /// Stable short code, used by the `check` report.
    pub fn code(&self) -> &'static str {
        match self {
            ScoreboardError::EmptyInput { .. } => "empty-input",
            ScoreboardError::DuplicateCompetitor { .. } => "duplicate-competitor",
            ScoreboardError::MissingScore { .. } => "missing-score",
            ScoreboardError::ScoreOutOfRange { .. } => "score-out-of-range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_message_names_dimension_and_competitor() {
        let err = ScoreboardError::MissingScore {
            dimension: "Backlink data".to_string(),
            competitor: "ahrefs".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Backlink data"));
        assert!(msg.contains("ahrefs"));
        assert_eq!(err.code(), "missing-score");
    }

    #[test]
    fn test_empty_input_message() {
        let err = ScoreboardError::EmptyInput {
            missing: EmptyPart::Dimensions,
        };
        assert_eq!(err.to_string(), "scoreboard has no dimensions");
    }

    #[test]
    fn test_out_of_range_message_includes_bounds() {
        let err = ScoreboardError::ScoreOutOfRange {
            dimension: "Pricing".to_string(),
            competitor: "zendesk".to_string(),
            score: 11.0,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "dimension 'Pricing' scores competitor 'zendesk' at 11, outside [0, 10]"
        );
    }
}
