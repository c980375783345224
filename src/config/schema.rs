use serde::{Deserialize, Serialize};

use crate::scoring::ScoreBounds;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Score bounds for documents that don't set their own (default 0-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ScoreBounds>,

    /// Output format when `--format` is not given (default: table)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

impl Config {
    pub fn effective_bounds(&self) -> ScoreBounds {
        self.bounds.unwrap_or_default()
    }

    pub fn effective_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}
