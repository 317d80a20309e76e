//! Error types for the simulation core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while constructing a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Errors raised while building a pattern mask.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The mask has no rows or no columns.
    #[error("pattern '{0}' is empty")]
    Empty(String),

    /// Rows of a mask have different lengths.
    #[error("pattern row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    /// Plaintext glyph that is neither alive nor dead.
    #[error("unknown glyph '{glyph}' at line {line}")]
    UnknownGlyph { glyph: char, line: usize },
}

/// Errors raised while decoding a saved grid.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Syntax error or wrong field type.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored grid has no cells.
    #[error("saved grid is empty")]
    EmptyGrid,

    /// Rows of the stored grid have different lengths.
    #[error("saved grid row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    /// A cell value other than 0 or 1.
    #[error("saved grid cell ({row}, {col}) has value {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u64 },
}

/// Errors raised while saving or loading a session file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File missing, unreadable or unwritable.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File contents could not be decoded.
    #[error("cannot decode save file: {0}")]
    Decode(#[from] DecodeError),

    /// State could not be encoded.
    #[error("cannot encode save file: {0}")]
    Encode(#[source] serde_json::Error),
}
