use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::document::ScoreboardDocument;

/// A parsed document together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: ScoreboardDocument,
}

/// Why a single scoreboard file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read scoreboard at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse scoreboard: invalid YAML in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl DocumentError {
    /// True when the file was read but its content is malformed
    pub fn is_parse(&self) -> bool {
        matches!(self, DocumentError::Parse { .. })
    }
}

/// Load one scoreboard document from a YAML file.
///
/// Score entries for undeclared competitors are logged and otherwise ignored.
pub fn load_document(path: &Path) -> Result<ScoreboardDocument, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: ScoreboardDocument =
        serde_saphyr::from_str(&content).map_err(|e| DocumentError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for extra in document.extra_score_keys() {
        warn!(
            file = %path.display(),
            dimension = %extra.dimension,
            key = %extra.key,
            "score for undeclared competitor ignored"
        );
    }

    Ok(document)
}

/// Expand file paths and glob patterns into a sorted, de-duplicated list.
///
/// A pattern that matches nothing is an error so a typo never silently
/// skips a page.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut matched = 0;
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))? {
            let path = entry.with_context(|| format!("Failed to read match for '{}'", pattern))?;
            if path.is_file() {
                paths.push(path);
                matched += 1;
            }
        }
        debug!(pattern, matched, "expanded pattern");
        if matched == 0 {
            bail!("No scoreboard files match '{}'", pattern);
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Load every file named by `patterns` independently, in path order.
///
/// Only pattern expansion can fail as a whole; each file carries its own
/// outcome so one broken page never hides problems in the others.
pub fn load_each<S: AsRef<str>>(
    patterns: &[S],
) -> Result<Vec<(PathBuf, Result<ScoreboardDocument, DocumentError>)>> {
    Ok(expand_patterns(patterns)?
        .into_iter()
        .map(|path| {
            let outcome = load_document(&path);
            (path, outcome)
        })
        .collect())
}

/// Load every document named by `patterns`, in path order, stopping at the
/// first file that fails.
pub fn load_documents<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<LoadedDocument>> {
    load_each(patterns)?
        .into_iter()
        .map(|(path, outcome)| {
            let document = outcome?;
            Ok(LoadedDocument { path, document })
        })
        .collect()
}

/// Write a document as YAML atomically, creating parent directories.
pub fn save_document(path: &Path, document: &ScoreboardDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(document)
        .map_err(|e| anyhow::anyhow!("Failed to serialize scoreboard: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write scoreboard to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save scoreboard to {}", path.display()))?;

    Ok(())
}
