use std::path::PathBuf;

use thiserror::Error;

use crate::types::DType;

/// Convenience result type used across the crate.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error type returned by construction, indexing, reductions, grouping, joins and ingestion.
///
/// This is a single error enum shared by the in-memory engine and the CSV/JSON readers.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying I/O error (e.g. permission denied while reading).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error (ragged rows, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input file does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// JSON orientation other than `records` / `columns`.
    #[error("unsupported json orient '{orient}' (expected 'records' or 'columns')")]
    UnsupportedOrient { orient: String },

    /// Input parsed fine but does not have the expected shape.
    #[error("malformed input: {message}")]
    Malformed { message: String },

    /// Column/data counts or column lengths disagree.
    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Two columns resolve to the same name.
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A referenced column does not exist.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// A reduction was applied to a column whose dtype does not support it.
    #[error(
        "cannot compute {operation}{column}: dtype {dtype} is not supported",
        column = column_display(.column)
    )]
    NonNumeric {
        column: Option<String>,
        dtype: DType,
        operation: &'static str,
    },

    /// Positional access outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A positional selector could not be interpreted.
    #[error("invalid index: {message}")]
    InvalidIndex { message: String },

    /// Bad `join`/`groupby` parameters.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A reduction needs at least one non-null value.
    #[error(
        "cannot compute {operation}{column}: no non-null values",
        column = column_display(.column)
    )]
    EmptyCollection {
        column: Option<String>,
        operation: &'static str,
    },
}

impl FrameError {
    pub(crate) fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    pub(crate) fn invalid_index(message: impl Into<String>) -> Self {
        Self::InvalidIndex {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

fn column_display(column: &Option<String>) -> String {
    column
        .as_ref()
        .map(|c| format!(" for column '{c}'"))
        .unwrap_or_default()
}
