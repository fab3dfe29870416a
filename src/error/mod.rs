//! Error handling for the Multilogin client.
//!
//! Every layer returns [`MultiloginError`]; the request pipeline passes errors
//! from the credential provider and auth flows to the caller unchanged.
//!
//! | Variant | Category | Raised by |
//! |---------|----------|-----------|
//! | `Configuration` | configuration | construction, refresh without identity |
//! | `Transport` | network | HTTP adapter |
//! | `Protocol` | server | envelope decoding |
//! | `Authentication` | auth | sign-in / refresh / mint returning a non-200 status |
//! | `TokenFormat` | client | expiry claim extraction |
//! | `AuthorizationUnavailable` | auth | request pipeline, no usable token |
//! | `Remote` | server | operation endpoints returning a non-200 status |
//! | `InvalidArgument` | client | argument validation before a request |

mod category;

pub use category::ErrorCategory;

use thiserror::Error;

use crate::traits::HttpError;

/// Failure modes of token expiry extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenFormatError {
    /// The token does not have exactly three dot-separated segments.
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),

    /// The claims segment is not valid base64url.
    #[error("claims segment is not valid base64url: {0}")]
    Base64(String),

    /// The claims segment does not decode to a JSON object.
    #[error("claims segment is not a JSON object: {0}")]
    Json(String),

    /// The claims carry no `exp` field.
    #[error("exp claim not found")]
    MissingExpiry,

    /// The `exp` field is not a representable number of seconds.
    #[error("exp claim has an invalid type or value")]
    InvalidExpiry,
}

/// Unified error type for client operations.
#[derive(Debug, Error)]
pub enum MultiloginError {
    /// Missing identity or credentials (empty email, password or token).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP call itself failed.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The response body is not the expected JSON envelope.
    #[error("protocol error on {endpoint}: {message}")]
    Protocol { endpoint: String, message: String },

    /// The remote service rejected a sign-in, refresh or mint request.
    #[error("{flow} failed ({http_code}): {message}")]
    Authentication {
        flow: &'static str,
        http_code: i64,
        error_code: String,
        message: String,
    },

    /// A token's structure or expiry claim could not be decoded.
    #[error("invalid token: {0}")]
    TokenFormat(#[from] TokenFormatError),

    /// No usable token after ensuring authorization.
    #[error("no valid token available for authorization")]
    AuthorizationUnavailable,

    /// An operation endpoint answered with a non-success status.
    #[error("request failed ({http_code}): {message}")]
    Remote {
        http_code: i64,
        error_code: String,
        message: String,
    },

    /// A caller-supplied argument was rejected before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MultiloginError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MultiloginError::Configuration(_) => ErrorCategory::Configuration,
            MultiloginError::Transport(_) => ErrorCategory::Network,
            MultiloginError::Protocol { .. } | MultiloginError::Remote { .. } => {
                ErrorCategory::Server
            }
            MultiloginError::Authentication { .. } | MultiloginError::AuthorizationUnavailable => {
                ErrorCategory::Auth
            }
            MultiloginError::TokenFormat(_) | MultiloginError::InvalidArgument(_) => {
                ErrorCategory::Client
            }
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            MultiloginError::Configuration(_) => "E_CONFIG",
            MultiloginError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            MultiloginError::Transport(_) => "E_NET",
            MultiloginError::Protocol { .. } => "E_PROTOCOL",
            MultiloginError::Authentication { .. } => "E_AUTH_REJECTED",
            MultiloginError::TokenFormat(_) => "E_TOKEN_FORMAT",
            MultiloginError::AuthorizationUnavailable => "E_AUTH_UNAVAILABLE",
            MultiloginError::Remote { .. } => "E_REMOTE",
            MultiloginError::InvalidArgument(_) => "E_ARGUMENT",
        }
    }

    pub(crate) fn protocol(endpoint: &str, err: impl std::fmt::Display) -> Self {
        MultiloginError::Protocol {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}

/// Type alias for Results using [`MultiloginError`].
pub type MultiloginResult<T> = Result<T, MultiloginError>;
