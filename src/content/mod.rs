//! Hand-authored scoreboard documents, one per comparison page.

mod document;
mod storage;

pub use document::{ExtraScore, ScoreboardDocument};
pub use storage::{
    expand_patterns, load_document, load_documents, load_each, save_document, DocumentError,
    LoadedDocument,
};
