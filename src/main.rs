use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use scoreboard::config::{self, OutputFormat};
use scoreboard::content::{self, DocumentError, LoadedDocument, ScoreboardDocument};
use scoreboard::output::{self, ScoredDocument};
use scoreboard::scoring::{
    collect_violations, ScoreBounds, ScoreboardAggregator, ScoreboardResult,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_CONTENT: i32 = 5;
const EXIT_IO: i32 = 6;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate scoreboards and print standings with per-dimension winners
    Show {
        /// Scoreboard YAML files or glob patterns (e.g. "pages/*.yaml")
        #[arg(required = true)]
        files: Vec<String>,

        /// Output format (defaults to the config file's, then table)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Report every authoring problem in the given scoreboards
    Check {
        /// Scoreboard YAML files or glob patterns
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Create a starter scoreboard document
    Init {
        /// Where to write it (prompted if omitted)
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scoreboard")]
#[command(about = "Rank competing tools across scored dimensions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scoreboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    scoreboard::logging::init(cli.verbose);
    let start_time = Instant::now();

    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let bounds = config.effective_bounds();
    debug!(min = bounds.min, max = bounds.max, "effective score bounds");

    let code = match cli.command {
        Commands::Show { files, format } => {
            let format = format.unwrap_or(config.effective_format());
            show(&files, bounds, format)
        }
        Commands::Check { files } => check(&files, bounds),
        Commands::Init { path } => match config::run_init(path, bounds) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_IO
            }
        },
    };

    info!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(code);
}

/// Exit code for a file that could not be loaded: malformed content is an
/// authoring error, anything else is I/O.
fn load_failure_code(error: &DocumentError) -> i32 {
    if error.is_parse() {
        EXIT_CONTENT
    } else {
        EXIT_IO
    }
}

type LoadOutcomes = Vec<(PathBuf, Result<ScoreboardDocument, DocumentError>)>;

fn load(files: &[String]) -> Result<LoadOutcomes, i32> {
    content::load_each(files).map_err(|e| {
        eprintln!("Failed to load scoreboards: {:#}", e);
        EXIT_IO
    })
}

/// Bounds for one document, or the reasons its own bounds are unusable.
fn document_bounds(
    loaded: &LoadedDocument,
    fallback: ScoreBounds,
) -> Result<ScoreBounds, Vec<String>> {
    let bounds = loaded.document.effective_bounds(fallback);
    bounds.validate()?;
    Ok(bounds)
}

fn show(files: &[String], bounds: ScoreBounds, format: OutputFormat) -> i32 {
    let mut loaded = Vec::new();
    match load(files) {
        Ok(outcomes) => {
            for (path, outcome) in outcomes {
                match outcome {
                    Ok(document) => loaded.push(LoadedDocument { path, document }),
                    Err(e) => {
                        eprintln!("{}", e);
                        return load_failure_code(&e);
                    }
                }
            }
        }
        Err(code) => return code,
    }

    // Authoring errors fail the whole run; never print partial rankings.
    let mut results: Vec<ScoreboardResult> = Vec::with_capacity(loaded.len());
    for doc in &loaded {
        let doc_bounds = match document_bounds(doc, bounds) {
            Ok(b) => b,
            Err(errors) => {
                for error in errors {
                    eprintln!("{}: {}", doc.path.display(), error);
                }
                return EXIT_CONTENT;
            }
        };
        match ScoreboardAggregator::new(doc_bounds).aggregate(&doc.document.input()) {
            Ok(result) => {
                debug!(file = %doc.path.display(), winner = result.winner.key(), "aggregated");
                results.push(result);
            }
            Err(e) => {
                eprintln!("{}: {}", doc.path.display(), e);
                return EXIT_CONTENT;
            }
        }
    }

    let scored: Vec<ScoredDocument> = loaded
        .iter()
        .zip(&results)
        .map(|(doc, result)| ScoredDocument {
            document: &doc.document,
            result,
        })
        .collect();

    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            let blocks: Vec<String> = scored
                .iter()
                .map(|s| {
                    format!(
                        "{}\n\n{}",
                        output::format_standings_table(s, use_colors),
                        output::format_dimension_table(s, use_colors)
                    )
                })
                .collect();
            println!("{}", blocks.join("\n\n"));
        }
        OutputFormat::Tsv => {
            let blocks: Vec<String> = scored.iter().map(output::format_tsv).collect();
            println!("{}", blocks.join("\n"));
        }
        OutputFormat::Json => match output::format_json(&scored) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize results: {}", e);
                return EXIT_IO;
            }
        },
    }

    EXIT_SUCCESS
}

fn check(files: &[String], bounds: ScoreBounds) -> i32 {
    let outcomes = match load(files) {
        Ok(outcomes) => outcomes,
        Err(code) => return code,
    };

    let file_count = outcomes.len();
    let mut problems = 0;
    let mut unreadable = 0;
    for (path, outcome) in outcomes {
        let mut messages: Vec<String> = Vec::new();
        match outcome {
            Ok(document) => {
                let doc = LoadedDocument { path, document };
                match document_bounds(&doc, bounds) {
                    Ok(doc_bounds) => {
                        messages.extend(
                            collect_violations(&doc.document.input(), &doc_bounds)
                                .iter()
                                .map(|v| format!("[{}] {}", v.code(), v)),
                        );
                    }
                    Err(errors) => {
                        messages.extend(errors.into_iter().map(|e| format!("[bounds] {}", e)))
                    }
                }
                report(&doc.path, &messages);
            }
            Err(e) if e.is_parse() => {
                messages.push(format!("[parse] {}", e));
                report(&path, &messages);
            }
            Err(e) => {
                messages.push(format!("[read] {}", e));
                report(&path, &messages);
                unreadable += 1;
            }
        }
        problems += messages.len();
    }

    if problems > 0 {
        eprintln!("{} problem(s) in {} file(s)", problems, file_count);
    }
    if unreadable > 0 {
        EXIT_IO
    } else if problems > 0 {
        EXIT_CONTENT
    } else {
        EXIT_SUCCESS
    }
}

fn report(path: &Path, messages: &[String]) {
    if messages.is_empty() {
        println!("{}: ok", path.display());
    } else {
        for message in messages {
            println!("{}: {}", path.display(), message);
        }
    }
}
