//! Rank competing products across scored dimensions.
//!
//! The `scoring` module is the pure core: validate a [`scoring::ScoreboardInput`],
//! compute per-competitor averages, the overall winner and per-dimension
//! winners. The rest loads YAML documents and renders results for the CLI.

pub mod config;
pub mod content;
pub mod logging;
pub mod output;
pub mod scoring;
