//! Error types for recognizer operations.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, ScrawlError>;

#[derive(Debug, Error)]
pub enum ScrawlError {
    /// A weight or dataset resource contains a field that is not a finite number,
    /// or a row whose width disagrees with the first row.
    #[error("malformed input at row {row}, column {column}: {reason}")]
    MalformedInput {
        row: usize,
        column: usize,
        reason: String,
    },

    /// A layer received an activation row of the wrong width.
    #[error("shape mismatch at layer {layer}: expected width {expected}, got {actual}")]
    ShapeMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("empty input")]
    EmptyInput,

    #[error("network has no layers")]
    EmptyNetwork,

    /// Comparison hit a NaN.
    #[error("undefined order: input contains NaN")]
    UndefinedOrder,

    #[error("unknown model: {name}")]
    UnknownModel { name: String },

    /// Prediction requested before any weights were installed.
    #[error("model not loaded")]
    NotReady,

    #[error("invalid raster: {reason}")]
    InvalidRaster { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("model loader thread panicked")]
    LoaderPanicked,
}

impl ScrawlError {
    #[must_use]
    pub fn malformed(row: usize, column: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            column,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_raster(reason: impl Into<String>) -> Self {
        Self::InvalidRaster {
            reason: reason.into(),
        }
    }
}

impl From<bincode::Error> for ScrawlError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for ScrawlError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
