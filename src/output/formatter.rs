use std::io::IsTerminal;

use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::content::ScoreboardDocument;
use crate::scoring::{
    CompetitorAverage, DimensionOutcome, DimensionWinner, ScoreboardResult, WinnerOutcome,
};

/// A document with its aggregated result, ready for display
pub struct ScoredDocument<'a> {
    pub document: &'a ScoreboardDocument,
    pub result: &'a ScoreboardResult,
}

impl ScoredDocument<'_> {
    fn title(&self) -> String {
        match &self.document.title {
            Some(title) => title.clone(),
            None => self
                .document
                .competitors
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(" vs "),
        }
    }

    fn name<'b>(&'b self, key: &'b str) -> &'b str {
        self.document.display_name(key)
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Format an average with exactly one decimal ("9.2", "10.0")
pub fn format_average(value: f64) -> String {
    format!("{:.1}", value)
}

/// Averages from best to worst; equal exact averages keep competitor order.
pub fn ranked(result: &ScoreboardResult) -> Vec<&CompetitorAverage> {
    let mut rows: Vec<&CompetitorAverage> = result.averages.iter().collect();
    rows.sort_by(|a, b| b.exact.total_cmp(&a.exact));
    rows
}

fn winner_marker(winner: &WinnerOutcome) -> &'static str {
    if winner.is_tie() {
        "winner (tie-break)"
    } else {
        "winner"
    }
}

/// Format overall standings: rank, name, average, winner marker.
///
/// ```text
/// Moz Pro vs Semrush vs Ahrefs
///  1. Semrush    9.2  winner
///  2. Ahrefs     8.9
///  3. Moz Pro    8.5
/// ```
pub fn format_standings_table(scored: &ScoredDocument, use_colors: bool) -> String {
    let rows = ranked(scored.result);
    let name_width = rows
        .iter()
        .map(|a| scored.name(&a.key).chars().count())
        .max()
        .unwrap_or(0);
    let winner_key = scored.result.winner.key();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let title = scored.title();
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    for (idx, average) in rows.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let name = pad(scored.name(&average.key), name_width);
        let score = format!("{:>5}", format_average(average.rounded));
        let marker = if average.key == winner_key {
            winner_marker(&scored.result.winner)
        } else {
            ""
        };

        let line = if use_colors {
            format!(
                "{} {}  {}  {}",
                index_str.dimmed(),
                name,
                score.bold(),
                marker.green()
            )
        } else {
            format!("{} {}  {}  {}", index_str, name, score, marker)
        };
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn dimension_winner_text(scored: &ScoredDocument, winner: &DimensionWinner) -> String {
    match winner {
        DimensionWinner::Sole(key) => scored.name(key).to_string(),
        DimensionWinner::Tie(keys) => format!(
            "tie ({})",
            keys.iter()
                .map(|k| scored.name(k))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Format one row per dimension with its winner, or the tied competitors.
pub fn format_dimension_table(scored: &ScoredDocument, use_colors: bool) -> String {
    let outcomes: &[DimensionOutcome] = &scored.result.per_dimension_winners;
    let winners: Vec<String> = outcomes
        .iter()
        .map(|o| dimension_winner_text(scored, &o.winner))
        .collect();

    let longest_label = outcomes
        .iter()
        .map(|o| o.label.chars().count())
        .max()
        .unwrap_or(0);
    let longest_winner = winners.iter().map(|w| w.chars().count()).max().unwrap_or(0);
    let separator = "  ";

    // Labels give way first on narrow terminals
    let label_width = match get_terminal_width() {
        Some(width) if width > longest_winner + separator.len() + 10 => {
            longest_label.min(width - longest_winner - separator.len())
        }
        Some(_) => longest_label.min(20),
        None => longest_label,
    };

    outcomes
        .iter()
        .zip(&winners)
        .map(|(outcome, winner)| {
            let label = pad(&truncate_label(&outcome.label, label_width), label_width);
            let winner = match (&outcome.winner, use_colors) {
                (_, false) => winner.clone(),
                (DimensionWinner::Sole(_), true) => winner.cyan().to_string(),
                (DimensionWinner::Tie(_), true) => winner.yellow().to_string(),
            };
            format!("{}{}{}", label, separator, winner)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format standings as tab-separated values for scripting
/// Columns: key, display name, average, winner flag (no headers, no colors)
pub fn format_tsv(scored: &ScoredDocument) -> String {
    let winner_key = scored.result.winner.key();
    ranked(scored.result)
        .iter()
        .map(|average| {
            format!(
                "{}\t{}\t{}\t{}",
                average.key,
                scored.name(&average.key),
                format_average(average.rounded),
                u8::from(average.key == winner_key)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(flatten)]
    result: &'a ScoreboardResult,
}

/// Format results as a pretty JSON array, one object per document
pub fn format_json(scored: &[ScoredDocument]) -> serde_json::Result<String> {
    let reports: Vec<JsonReport> = scored
        .iter()
        .map(|s| JsonReport {
            title: s.document.title.as_deref(),
            result: s.result,
        })
        .collect();
    serde_json::to_string_pretty(&reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Competitor, ScoreDimension, ScoreboardAggregator};

    fn seo_document() -> ScoreboardDocument {
        let rows = [
            ("Keyword research", [8.6, 8.8, 9.6]),
            ("Site audit", [8.7, 9.3, 9.4]),
            ("Rank tracking", [9.1, 9.0, 8.7]),
            ("Backlink data", [7.8, 9.2, 8.2]),
            ("Content tools", [8.2, 9.5, 8.5]),
        ];
        ScoreboardDocument {
            title: Some("Moz Pro vs Semrush vs Ahrefs".to_string()),
            bounds: None,
            competitors: vec![
                Competitor::new("moz pro", "Moz Pro"),
                Competitor::new("semrush", "Semrush"),
                Competitor::new("ahrefs", "Ahrefs"),
            ],
            dimensions: rows
                .iter()
                .map(|(label, [moz, semrush, ahrefs])| {
                    ScoreDimension::new(
                        *label,
                        [("moz pro", *moz), ("semrush", *semrush), ("ahrefs", *ahrefs)],
                    )
                })
                .collect(),
        }
    }

    fn tie_document() -> ScoreboardDocument {
        ScoreboardDocument {
            title: None,
            bounds: None,
            competitors: vec![
                Competitor::new("zoho desk", "Zoho Desk"),
                Competitor::new("zendesk", "Zendesk"),
            ],
            dimensions: vec![ScoreDimension::new(
                "Overall",
                [("zoho desk", 9.0), ("zendesk", 9.0)],
            )],
        }
    }

    fn aggregate(document: &ScoreboardDocument) -> ScoreboardResult {
        ScoreboardAggregator::default()
            .aggregate(&document.input())
            .unwrap()
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(9.2), "9.2");
        assert_eq!(format_average(10.0), "10.0");
        assert_eq!(format_average(0.0), "0.0");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Pricing", 20), "Pricing");
        assert_eq!(truncate_label("Backlink data quality", 10), "Backlin...");
        assert_eq!(truncate_label("Backlink", 3), "Bac");
    }

    #[test]
    fn test_ranked_order() {
        let doc = seo_document();
        let result = aggregate(&doc);
        let keys: Vec<&str> = ranked(&result).iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["semrush", "ahrefs", "moz pro"]);
    }

    #[test]
    fn test_standings_table() {
        let doc = seo_document();
        let result = aggregate(&doc);
        let scored = ScoredDocument {
            document: &doc,
            result: &result,
        };
        let output = format_standings_table(&scored, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Moz Pro vs Semrush vs Ahrefs");
        assert_eq!(lines[1], " 1. Semrush    9.2  winner");
        assert_eq!(lines[2], " 2. Ahrefs     8.9");
        assert_eq!(lines[3], " 3. Moz Pro    8.5");
    }

    #[test]
    fn test_standings_table_marks_tie_break() {
        let doc = tie_document();
        let result = aggregate(&doc);
        let scored = ScoredDocument {
            document: &doc,
            result: &result,
        };
        let output = format_standings_table(&scored, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Zoho Desk vs Zendesk");
        assert!(lines[1].contains("Zoho Desk"));
        assert!(lines[1].ends_with("winner (tie-break)"));
        assert!(!lines[2].contains("winner"));
    }

    #[test]
    fn test_dimension_table() {
        let doc = tie_document();
        let result = aggregate(&doc);
        let scored = ScoredDocument {
            document: &doc,
            result: &result,
        };
        let output = format_dimension_table(&scored, false);
        assert!(output.starts_with("Overall"));
        assert!(output.ends_with("tie (Zoho Desk, Zendesk)"));

        let doc = seo_document();
        let result = aggregate(&doc);
        let scored = ScoredDocument {
            document: &doc,
            result: &result,
        };
        let output = format_dimension_table(&scored, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Keyword research"));
        assert!(lines[0].ends_with("Ahrefs"));
        assert!(lines[2].ends_with("Moz Pro"));
    }

    #[test]
    fn test_format_tsv() {
        let doc = seo_document();
        let result = aggregate(&doc);
        let scored = ScoredDocument {
            document: &doc,
            result: &result,
        };
        assert_eq!(
            format_tsv(&scored),
            "semrush\tSemrush\t9.2\t1\nahrefs\tAhrefs\t8.9\t0\nmoz pro\tMoz Pro\t8.5\t0"
        );
    }

    #[test]
    fn test_format_json() {
        let doc = tie_document();
        let result = aggregate(&doc);
        let scored = vec![ScoredDocument {
            document: &doc,
            result: &result,
        }];
        let json = format_json(&scored).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let report = &value[0];
        assert!(report.get("title").is_none());
        assert_eq!(report["winner"]["kind"], "tie_broken");
        assert_eq!(report["winner"]["key"], "zoho desk");
        assert_eq!(report["averages"][1]["key"], "zendesk");
        assert_eq!(report["averages"][1]["average"], 9.0);
        assert_eq!(
            report["per_dimension_winners"][0]["winner"]["tie"][1],
            "zendesk"
        );
    }
}
