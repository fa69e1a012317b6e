// ── Core error types ──
//
// Request failures pass through untouched: callers see the same
// `RequestFailed` the API layer produced, with its status and message.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors (surfaced as-is) ──────────────────────────────────
    #[error(transparent)]
    Request(#[from] botdeck_api::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// The underlying API error, if this came from a request.
    pub fn api(&self) -> Option<&botdeck_api::Error> {
        match self {
            Self::Request(err) => Some(err),
            Self::Config { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api().is_some_and(botdeck_api::Error::is_not_found)
    }
}
