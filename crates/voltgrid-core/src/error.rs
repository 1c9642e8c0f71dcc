// ── Core error types ──
//
// Resolution itself never fails -- missing data is a defined state.
// Errors here cover the strict config paths (editor validation,
// persistence round-trips) where a caller asked for a guarantee.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid widget config: {message}")]
    InvalidConfig { message: String },

    #[error("config serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
