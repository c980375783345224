pub mod formatter;

pub use formatter::{
    format_average, format_dimension_table, format_json, format_standings_table, format_tsv,
    ranked, should_use_colors, ScoredDocument,
};
