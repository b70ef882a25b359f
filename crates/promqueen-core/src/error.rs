//! Error types for projection and response decoding.

use thiserror::Error;

/// A caller handed the projector something it cannot draw.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("series has no samples")]
    EmptySeries,

    #[error("sample {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("grid must be at least 1x1, got {columns}x{rows}")]
    EmptyGrid { columns: usize, rows: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The backend answered with `"status": "error"`.
    #[error("{error_type}: {message}")]
    Backend { error_type: String, message: String },

    #[error("query returned zero series")]
    NoSeries,

    #[error("sample value {0:?} is not a number")]
    BadSample(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
