//! Error types for loading tuning data and collaborator-supplied buffers.
//!
//! The per-frame simulation never fails; these only surface at construction.

use thiserror::Error;

/// Errors that can occur while building sessions, masks or maps.
#[derive(Debug, Error)]
pub enum Error {
    /// Tuning JSON could not be parsed.
    #[error("Failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),

    /// Tuning parsed but holds values the simulation cannot run with.
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// A pixel buffer does not match its declared dimensions.
    #[error("{what} buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
