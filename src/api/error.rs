//! Error types for controller API calls.

use thiserror::Error;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request could not be built; nothing was sent.
    Construction,
    /// Network unreachable, TLS failure, connection reset.
    Transport,
    /// The controller answered with a non-2xx status.
    Protocol,
    /// The body did not match the expected JSON shape.
    Decode,
}

/// Errors that can occur while talking to a controller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Host/port/path did not form a valid URL.
    #[error("invalid controller URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Secret contains characters not allowed in a header value.
    #[error("secret cannot be sent as an Authorization header")]
    InvalidSecret,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Controller returned a status outside 200..=299.
    #[error("controller returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidUrl { .. } | ApiError::InvalidSecret => ErrorKind::Construction,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Status { .. } => ErrorKind::Protocol,
            ApiError::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Result type for controller API calls.
pub type ApiResult<T> = Result<T, ApiError>;
