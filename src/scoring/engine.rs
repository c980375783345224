use tracing::debug;

use super::config::ScoreBounds;
use super::error::ScoreboardError;
use super::model::{
    Averages, CompetitorAverage, DimensionOutcome, DimensionWinner, ScoreboardInput,
    ScoreboardResult, WinnerOutcome,
};
use super::validation::validate_input;

/// Scaled values within this distance of a .5 boundary round away from zero.
/// Absorbs binary representation error, e.g. 8.85 stored as 8.8499999...
const ROUNDING_NUDGE: f64 = 1e-9;

/// Ranks competitors across scored dimensions.
///
/// Stateless apart from the score bounds; every call validates its input
/// and either returns a complete result or the first violation found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreboardAggregator {
    bounds: ScoreBounds,
}

impl ScoreboardAggregator {
    /// `bounds` must already pass [`ScoreBounds::validate`]; with NaN or
    /// inverted bounds every score would be reported out of range.
    pub fn new(bounds: ScoreBounds) -> Self {
        debug_assert!(bounds.validate().is_ok(), "invalid score bounds: {:?}", bounds);
        Self { bounds }
    }

    /// Mean score per competitor across all dimensions, in competitor order.
    pub fn compute_averages(&self, input: &ScoreboardInput) -> Result<Averages, ScoreboardError> {
        validate_input(input, &self.bounds)?;
        Ok(averages_of(input))
    }

    /// Competitor with the highest unrounded average.
    ///
    /// Exact ties go to the competitor listed first in the input, and the
    /// outcome says so.
    pub fn compute_winner(&self, averages: &Averages) -> WinnerOutcome {
        winner_of(averages)
    }

    /// Top scorer of each dimension, or an explicit tie.
    pub fn compute_dimension_winners(
        &self,
        input: &ScoreboardInput,
    ) -> Result<Vec<DimensionOutcome>, ScoreboardError> {
        validate_input(input, &self.bounds)?;
        Ok(dimension_winners_of(input))
    }

    /// Averages, overall winner and per-dimension winners in one pass.
    pub fn aggregate(&self, input: &ScoreboardInput) -> Result<ScoreboardResult, ScoreboardError> {
        validate_input(input, &self.bounds)?;
        let averages = averages_of(input);
        let winner = winner_of(&averages);
        let per_dimension_winners = dimension_winners_of(input);
        Ok(ScoreboardResult {
            averages,
            winner,
            per_dimension_winners,
        })
    }
}

/// Round to one decimal place, half away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    let rounded = (scaled + ROUNDING_NUDGE.copysign(scaled)).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

// Input must already be validated.
fn averages_of(input: &ScoreboardInput) -> Averages {
    let count = input.dimensions.len() as f64;
    let entries = input
        .competitors
        .iter()
        .map(|competitor| {
            let mut scores: Vec<f64> = input
                .dimensions
                .iter()
                .filter_map(|d| d.scores.get(&competitor.key).copied())
                .collect();
            // Fixed summation order keeps the mean identical under any
            // permutation of dimensions.
            scores.sort_by(f64::total_cmp);
            let exact = scores.iter().sum::<f64>() / count;
            let rounded = round_to_tenth(exact);
            debug!(competitor = %competitor.key, exact, rounded, "computed average");
            CompetitorAverage {
                key: competitor.key.clone(),
                exact,
                rounded,
            }
        })
        .collect();
    Averages { entries }
}

fn winner_of(averages: &Averages) -> WinnerOutcome {
    let best = averages
        .iter()
        .map(|a| a.exact)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut leaders = averages
        .iter()
        .filter(|a| a.exact == best)
        .map(|a| a.key.clone());

    // Averages is never empty, so there is always a leader.
    let key = leaders.next().unwrap_or_default();
    let tied_with: Vec<String> = leaders.collect();

    if tied_with.is_empty() {
        WinnerOutcome::Clear { key }
    } else {
        debug!(winner = %key, ?tied_with, "tie resolved by competitor order");
        WinnerOutcome::TieBroken { key, tied_with }
    }
}

fn dimension_winners_of(input: &ScoreboardInput) -> Vec<DimensionOutcome> {
    input
        .dimensions
        .iter()
        .map(|dimension| {
            let scored: Vec<(&str, f64)> = input
                .competitors
                .iter()
                .filter_map(|c| dimension.scores.get(&c.key).map(|&s| (c.key.as_str(), s)))
                .collect();
            let best = scored
                .iter()
                .map(|&(_, s)| s)
                .fold(f64::NEG_INFINITY, f64::max);
            let mut leaders: Vec<String> = scored
                .iter()
                .filter(|&&(_, s)| s == best)
                .map(|&(k, _)| k.to_string())
                .collect();

            let winner = if leaders.len() == 1 {
                DimensionWinner::Sole(leaders.remove(0))
            } else {
                DimensionWinner::Tie(leaders)
            };
            DimensionOutcome {
                label: dimension.label.clone(),
                winner,
            }
        })
        .collect()
}
