use thiserror::Error;

/// What went wrong while performing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum FailureKind {
    /// Connection refused, DNS failure, reset mid-body, etc.
    Transport,
    /// The fixed per-request timeout elapsed.
    Timeout,
    /// The server answered with a non-2xx status.
    Status,
    /// The body could not be decoded into the expected shape.
    Decode,
}

/// Top-level error type for the `botdeck-api` crate.
///
/// Every request failure is a [`RequestFailed`](Error::RequestFailed);
/// there is no per-endpoint translation. The remaining variants only occur
/// while constructing a client, never while performing a request.
#[derive(Debug, Error)]
pub enum Error {
    /// A request did not produce a usable response.
    #[error("Request failed: {}", describe(.kind, .status, .message))]
    RequestFailed {
        kind: FailureKind,
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        /// Server-provided message if one could be extracted, otherwise a
        /// description of the transport or decode failure.
        message: String,
    },

    /// Base URL or request path could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying `reqwest::Client` could not be built (bad CA file, etc.)
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn describe(kind: &FailureKind, status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("{kind} error (HTTP {code}): {message}"),
        None => format!("{kind} error: {message}"),
    }
}

impl Error {
    pub(crate) fn status(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            kind: FailureKind::Status,
            status: Some(status),
            message: message.into(),
        }
    }

    pub(crate) fn decode(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            kind: FailureKind::Decode,
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status carried by a failed request, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// The failure kind, for request errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::RequestFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// Returns `true` for failures that might succeed if the caller tries
    /// again. The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed {
                kind: FailureKind::Transport | FailureKind::Timeout,
                ..
            } => true,
            Self::RequestFailed {
                kind: FailureKind::Status,
                status: Some(code),
                ..
            } => matches!(*code, 502..=504),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_decode() {
            FailureKind::Decode
        } else {
            FailureKind::Transport
        };
        Self::RequestFailed {
            kind,
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
