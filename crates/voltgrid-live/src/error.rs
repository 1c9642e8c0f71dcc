// ── Runtime error types ──
//
// Everything here is contained at the widget boundary: a failed fetch
// becomes that widget's inline error state, never a page failure.

use thiserror::Error;

/// Unified error type for the runtime crate.
#[derive(Debug, Error)]
pub enum LiveError {
    #[error("live data feed unavailable: {message}")]
    FeedUnavailable { message: String },

    #[error("historical query failed: {message}")]
    HistoryQuery { message: String },

    #[error("alarm store query failed: {message}")]
    AlarmStore { message: String },

    #[error("device catalog unavailable: {message}")]
    Catalog { message: String },

    #[error("image library error: {message}")]
    ImageLibrary { message: String },

    #[error("settings loading failed: {0}")]
    Settings(Box<figment::Error>),
}

impl From<figment::Error> for LiveError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}
