//! Typed failures produced by the game API client

use thiserror::Error;

pub const TIMEOUT: &str = "TIMEOUT";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
pub const DECODE_ERROR: &str = "DECODE_ERROR";

/// Classified API failure. Only the client's request path constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The transport aborted the request (timeout or cancellation)
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// The backend could not be reached
    #[error("Network error. Please check your internet connection and try again.")]
    Network,

    /// Anything the transport raised that is neither of the above
    #[error("An unexpected error occurred. Please try again later.")]
    Unknown,

    /// The backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16, status_text: String },

    /// The backend answered 2xx but the body was not the expected JSON
    #[error("Malformed response body: {detail}")]
    Decode { status: u16, detail: String },
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiError::Timeout => 408,
            ApiError::Network => 0,
            ApiError::Unknown => 500,
            ApiError::Http { status, .. } => *status,
            ApiError::Decode { status, .. } => *status,
        }
    }

    /// Machine-readable code; the HTTP status text for non-2xx responses
    pub fn code(&self) -> &str {
        match self {
            ApiError::Timeout => TIMEOUT,
            ApiError::Network => NETWORK_ERROR,
            ApiError::Unknown => UNKNOWN_ERROR,
            ApiError::Http { status_text, .. } => status_text,
            ApiError::Decode { .. } => DECODE_ERROR,
        }
    }

    /// Classify a transport-level failure
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() || err.is_request() {
            ApiError::Network
        } else {
            ApiError::Unknown
        }
    }
}
