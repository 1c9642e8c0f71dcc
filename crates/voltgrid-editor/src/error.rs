// ── Editor error types ──

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("widgets of unknown type cannot be edited")]
    UnknownWidgetType,

    #[error("unknown field '{field}' for {kind} widgets")]
    UnknownField { field: String, kind: String },

    #[error("invalid config draft: {message}")]
    InvalidDraft { message: String },

    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },
}
