pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod validation;

pub use config::ScoreBounds;
pub use engine::{round_to_tenth, ScoreboardAggregator};
pub use error::{EmptyPart, ScoreboardError};
pub use model::*;
pub use validation::{collect_violations, validate_input};
