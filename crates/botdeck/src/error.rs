//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use botdeck_api::FailureKind;
use botdeck_config::ConfigError;
use botdeck_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API: {message}")]
    #[diagnostic(
        code(botdeck::connection_failed),
        help(
            "Check that the API server is running and reachable.\n\
             Override the address with --api-url / --admin-url, or run: botdeck config init"
        )
    )]
    ConnectionFailed { message: String },

    #[error("Request timed out: {message}")]
    #[diagnostic(
        code(botdeck::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(code(botdeck::not_found))]
    NotFound { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(botdeck::api_error))]
    ApiError { status: u16, message: String },

    #[error("API temporarily unavailable (HTTP {status}): {message}")]
    #[diagnostic(
        code(botdeck::unavailable),
        help("The server or a proxy in front of it is overloaded or restarting. Try again shortly.")
    )]
    Unavailable { status: u16, message: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(
        code(botdeck::decode),
        help("The server answered with a body this client does not understand. Check --api-url.")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(botdeck::validation))]
    Validation { field: String, reason: String },

    #[error("Nothing to update")]
    #[diagnostic(
        code(botdeck::empty_update),
        help("Pass at least one field flag, e.g. --name or --enable-chat. See --help.")
    )]
    EmptyUpdate,

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(botdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: botdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(botdeck::config))]
    Config(#[from] ConfigError),

    #[error("Failed to set up the HTTP client: {message}")]
    #[diagnostic(code(botdeck::client_setup))]
    ClientSetup { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(botdeck::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(botdeck::serialize))]
    Serialize(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::EmptyUpdate | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── API / Core → CliError mapping ────────────────────────────────────

impl From<botdeck_api::Error> for CliError {
    fn from(err: botdeck_api::Error) -> Self {
        let transient = err.is_transient();
        match err {
            botdeck_api::Error::RequestFailed {
                kind,
                status,
                message,
            } => match (kind, status) {
                (FailureKind::Timeout, _) => CliError::Timeout { message },
                (FailureKind::Transport, _) => CliError::ConnectionFailed { message },
                (FailureKind::Decode, _) => CliError::Decode { message },
                (FailureKind::Status, Some(404)) => CliError::NotFound { message },
                (FailureKind::Status, Some(422)) => CliError::Validation {
                    field: "request".into(),
                    reason: message,
                },
                (FailureKind::Status, Some(status)) if transient => {
                    CliError::Unavailable { status, message }
                }
                (FailureKind::Status, code) => CliError::ApiError {
                    status: code.unwrap_or_default(),
                    message,
                },
            },
            botdeck_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            botdeck_api::Error::ClientBuild(message) => CliError::ClientSetup { message },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Request(api) => api.into(),
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: FailureKind, status: Option<u16>) -> botdeck_api::Error {
        botdeck_api::Error::RequestFailed {
            kind,
            status,
            message: "boom".into(),
        }
    }

    #[test]
    fn request_failures_map_to_exit_codes() {
        let cases = [
            (request(FailureKind::Transport, None), exit_code::CONNECTION),
            (request(FailureKind::Timeout, None), exit_code::TIMEOUT),
            (request(FailureKind::Status, Some(404)), exit_code::NOT_FOUND),
            (request(FailureKind::Status, Some(422)), exit_code::USAGE),
            (request(FailureKind::Status, Some(500)), exit_code::GENERAL),
            (request(FailureKind::Status, Some(503)), exit_code::GENERAL),
            (request(FailureKind::Decode, Some(200)), exit_code::GENERAL),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn gateway_errors_carry_a_retry_hint() {
        let err = CliError::from(request(FailureKind::Status, Some(502)));
        assert!(matches!(err, CliError::Unavailable { status: 502, .. }));
        let err = CliError::from(request(FailureKind::Status, Some(500)));
        assert!(matches!(err, CliError::ApiError { status: 500, .. }));
    }

    #[test]
    fn core_errors_unwrap_to_the_request() {
        let core = CoreError::Request(request(FailureKind::Status, Some(404)));
        assert!(matches!(CliError::from(core), CliError::NotFound { .. }));
    }
}
