//! Error types for reading changed-file lists.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for input parsing.
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors raised while turning provider output into file records.
///
/// The graph engine never fails; everything that can go wrong happens
/// here, before the file list reaches it.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid JSON file list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: expected `<additions>\\t<deletions>\\t<path>`, got {content:?}")]
    Numstat { line: usize, content: String },

    #[error("line {line}: invalid count {value:?}")]
    Count { line: usize, value: String },

    #[error("file record {index} has an empty path")]
    EmptyPath { index: usize },

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
