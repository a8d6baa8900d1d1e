//! Error types for grid construction, cell access and document I/O.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core.
#[derive(Error, Debug)]
pub enum Error {
    /// A grid dimension, or the total cell count, is outside `min..=max`.
    #[error("invalid dimension: {field} must be between {min} and {max}, got {value}")]
    InvalidDimension {
        field: &'static str,
        min: usize,
        max: usize,
        value: usize,
    },

    /// Cell access outside the grid.
    #[error("cell (row {row}, col {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The document could not be turned into a design or collection.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Reading or writing a document failed.
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a document to JSON failed.
    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why a document tree was rejected.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not JSON at all.
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Required field is missing
    #[error("missing required field: {field}")]
    MissingField {
        /// Dotted path of the missing field
        field: String,
    },

    /// A field holds the wrong kind of value.
    #[error("field {field} must be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// A sparse bead entry does not fit the grid described by `__info__`.
    #[error("bead entry {index}: {message}")]
    MalformedSparseList { index: usize, message: String },
}

impl ParseError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }
}
