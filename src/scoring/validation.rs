use std::collections::HashSet;

use super::config::ScoreBounds;
use super::error::{EmptyPart, ScoreboardError};
use super::model::ScoreboardInput;

/// Validate a scoreboard before aggregation and return the first violation.
///
/// Checks run in a fixed order so the reported error is reproducible:
/// empty input, duplicate keys, missing scores, out-of-range scores.
pub fn validate_input(input: &ScoreboardInput, bounds: &ScoreBounds) -> Result<(), ScoreboardError> {
    match collect_violations(input, bounds).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every violation in the input, in the same order `validate_input` checks them.
///
/// Score entries for keys that are not declared competitors are not
/// violations; the aggregator never reads them.
pub fn collect_violations(input: &ScoreboardInput, bounds: &ScoreBounds) -> Vec<ScoreboardError> {
    let mut errors = Vec::new();

    if input.competitors.is_empty() {
        errors.push(ScoreboardError::EmptyInput {
            missing: EmptyPart::Competitors,
        });
    }
    if input.dimensions.is_empty() {
        errors.push(ScoreboardError::EmptyInput {
            missing: EmptyPart::Dimensions,
        });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for competitor in &input.competitors {
        if !seen.insert(competitor.key.as_str()) && reported.insert(competitor.key.as_str()) {
            errors.push(ScoreboardError::DuplicateCompetitor {
                key: competitor.key.clone(),
            });
        }
    }

    for dimension in &input.dimensions {
        for competitor in &input.competitors {
            if !dimension.scores.contains_key(&competitor.key) {
                errors.push(ScoreboardError::MissingScore {
                    dimension: dimension.label.clone(),
                    competitor: competitor.key.clone(),
                });
            }
        }
    }

    for dimension in &input.dimensions {
        for competitor in &input.competitors {
            if let Some(&score) = dimension.scores.get(&competitor.key) {
                if !bounds.contains(score) {
                    errors.push(ScoreboardError::ScoreOutOfRange {
                        dimension: dimension.label.clone(),
                        competitor: competitor.key.clone(),
                        score,
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Competitor, ScoreDimension};

    fn two_way() -> ScoreboardInput {
        ScoreboardInput {
            competitors: vec![
                Competitor::new("zoho desk", "Zoho Desk"),
                Competitor::new("zendesk", "Zendesk"),
            ],
            dimensions: vec![
                ScoreDimension::new("Ease of use", [("zoho desk", 9.0), ("zendesk", 8.5)]),
                ScoreDimension::new("Pricing", [("zoho desk", 9.2), ("zendesk", 7.9)]),
            ],
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&two_way(), &ScoreBounds::default()).is_ok());
    }

    #[test]
    fn test_no_competitors() {
        let mut input = two_way();
        input.competitors.clear();
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::EmptyInput {
                missing: EmptyPart::Competitors
            }
        );
    }

    #[test]
    fn test_no_dimensions() {
        let mut input = two_way();
        input.dimensions.clear();
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::EmptyInput {
                missing: EmptyPart::Dimensions
            }
        );
    }

    #[test]
    fn test_duplicate_competitor() {
        let mut input = two_way();
        input.competitors.push(Competitor::new("zendesk", "Zendesk again"));
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::DuplicateCompetitor {
                key: "zendesk".to_string()
            }
        );
    }

    #[test]
    fn test_missing_score_not_treated_as_zero() {
        let mut input = two_way();
        input.dimensions[1].scores.remove("zendesk");
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::MissingScore {
                dimension: "Pricing".to_string(),
                competitor: "zendesk".to_string(),
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut input = two_way();
        input.dimensions[0].scores.insert("zoho desk".to_string(), 0.0);
        input.dimensions[0].scores.insert("zendesk".to_string(), 10.0);
        assert!(validate_input(&input, &ScoreBounds::default()).is_ok());
    }

    #[test]
    fn test_score_above_max() {
        let mut input = two_way();
        input.dimensions[0].scores.insert("zendesk".to_string(), 11.0);
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(err.code(), "score-out-of-range");
    }

    #[test]
    fn test_score_below_min() {
        let mut input = two_way();
        input.dimensions[0].scores.insert("zendesk".to_string(), -1.0);
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(err.code(), "score-out-of-range");
    }

    #[test]
    fn test_nan_rejected() {
        let mut input = two_way();
        input.dimensions[1].scores.insert("zoho desk".to_string(), f64::NAN);
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(err.code(), "score-out-of-range");
    }

    #[test]
    fn test_infinite_scores_rejected() {
        for score in [f64::INFINITY, f64::NEG_INFINITY] {
            let mut input = two_way();
            input.dimensions[0].scores.insert("zendesk".to_string(), score);
            let err = validate_input(&input, &ScoreBounds::new(f64::MIN, f64::MAX)).unwrap_err();
            assert_eq!(err.code(), "score-out-of-range");
        }
    }

    #[test]
    fn test_empty_reported_before_duplicates() {
        let mut input = two_way();
        input.dimensions.clear();
        input.competitors.push(Competitor::new("zendesk", "Zendesk again"));
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(
            err,
            ScoreboardError::EmptyInput {
                missing: EmptyPart::Dimensions
            }
        );
    }

    #[test]
    fn test_custom_bounds() {
        let input = two_way();
        let err = validate_input(&input, &ScoreBounds::new(0.0, 5.0)).unwrap_err();
        match err {
            ScoreboardError::ScoreOutOfRange { dimension, competitor, max, .. } => {
                assert_eq!(dimension, "Ease of use");
                assert_eq!(competitor, "zoho desk");
                assert_eq!(max, 5.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicates_reported_before_missing_scores() {
        let mut input = two_way();
        input.competitors.push(Competitor::new("zoho desk", "Zoho"));
        input.dimensions[0].scores.remove("zendesk");
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(err.code(), "duplicate-competitor");
    }

    #[test]
    fn test_missing_reported_before_out_of_range() {
        let mut input = two_way();
        input.dimensions[0].scores.insert("zoho desk".to_string(), 42.0);
        input.dimensions[1].scores.remove("zendesk");
        let err = validate_input(&input, &ScoreBounds::default()).unwrap_err();
        assert_eq!(err.code(), "missing-score");
    }

    #[test]
    fn test_extra_score_keys_ignored() {
        let mut input = two_way();
        input.dimensions[0].scores.insert("freshdesk".to_string(), 99.0);
        assert!(validate_input(&input, &ScoreBounds::default()).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut input = two_way();
        input.dimensions[0].scores.remove("zoho desk");
        input.dimensions[1].scores.insert("zendesk".to_string(), 12.0);
        let errors = collect_violations(&input, &ScoreBounds::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code(), "missing-score");
        assert_eq!(errors[1].code(), "score-out-of-range");
    }

    #[test]
    fn test_duplicate_reported_once() {
        let mut input = two_way();
        input.competitors.push(Competitor::new("zendesk", "Z2"));
        input.competitors.push(Competitor::new("zendesk", "Z3"));
        let errors = collect_violations(&input, &ScoreBounds::default());
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.code() == "duplicate-competitor")
                .count(),
            1
        );
    }
}
