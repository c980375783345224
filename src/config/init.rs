use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::content::{save_document, ScoreboardDocument};
use crate::scoring::{Competitor, ScoreBounds, ScoreDimension};

const DEFAULT_DOCUMENT_PATH: &str = "scoreboard.yaml";
const DEFAULT_COMPETITORS: &str = "Tool A, Tool B";
const DEFAULT_DIMENSIONS: &str = "Features, Ease of use, Pricing, Support";

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// First name whose lowercased key repeats an earlier one.
fn duplicate_key(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .find(|name| !seen.insert(name.to_lowercase()))
        .map(String::as_str)
}

/// Build a document with every score at the midpoint of `bounds`,
/// ready for an author to fill in.
///
/// Competitor keys are the lowercased display names.
pub fn starter_document(
    title: &str,
    competitor_names: &[String],
    dimension_labels: &[String],
    bounds: ScoreBounds,
) -> ScoreboardDocument {
    let midpoint = (bounds.min + bounds.max) / 2.0;
    let competitors: Vec<Competitor> = competitor_names
        .iter()
        .map(|name| Competitor::new(name.to_lowercase(), name.as_str()))
        .collect();
    let dimensions = dimension_labels
        .iter()
        .map(|label| {
            ScoreDimension::new(
                label.as_str(),
                competitors.iter().map(|c| (c.key.clone(), midpoint)),
            )
        })
        .collect();

    ScoreboardDocument {
        title: Some(title.to_string()),
        bounds: None,
        competitors,
        dimensions,
    }
}

/// Interactively create a starter scoreboard document.
///
/// If `path` is None, prompts with `scoreboard.yaml` as the default.
pub fn run_init(path: Option<PathBuf>, bounds: ScoreBounds) -> Result<()> {
    println!();
    println!("Scoreboard Setup");
    println!("================");
    println!();

    let competitor_names = loop {
        let input = prompt_with_default("Competitors (comma separated)", DEFAULT_COMPETITORS)?;
        let names = split_list(&input);
        if names.len() < 2 {
            println!("  At least two competitors are needed. Try again.");
        } else if let Some(name) = duplicate_key(&names) {
            println!(
                "  '{}' is listed twice (names are compared case-insensitively). Try again.",
                name
            );
        } else {
            break names;
        }
    };

    let dimension_labels = loop {
        let input = prompt_with_default("Dimensions (comma separated)", DEFAULT_DIMENSIONS)?;
        let labels = split_list(&input);
        if !labels.is_empty() {
            break labels;
        }
        println!("  At least one dimension is needed. Try again.");
    };

    let default_title = competitor_names.join(" vs ");
    let title = prompt_with_default("Title", &default_title)?;

    let document_path = match path {
        Some(p) => p,
        None => PathBuf::from(prompt_with_default(
            "Where should the scoreboard be saved?",
            DEFAULT_DOCUMENT_PATH,
        )?),
    };

    if document_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite?", document_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let document = starter_document(&title, &competitor_names, &dimension_labels, bounds);
    save_document(&document_path, &document)?;

    println!();
    println!("Scoreboard written to {}", document_path.display());
    println!(
        "Every score starts at {}. Edit the file, then run `scoreboard show {}`.",
        (bounds.min + bounds.max) / 2.0,
        document_path.display()
    );

    Ok(())
}
