//! Error category classification.
//!
//! Categories give callers one place to decide whether a failed call is worth
//! retrying and what to tell the user.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, DNS, timeout).
    /// Generally transient and retryable.
    Network,

    /// Authentication/authorization errors.
    /// The remote service rejected the credentials or no token is usable.
    Auth,

    /// The remote service answered with something this client cannot decode,
    /// or reported a failure on an operation endpoint.
    Server,

    /// Invalid input supplied by the caller (malformed token, bad argument).
    Client,

    /// Missing or empty configuration (credentials, identity).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Check your email and password, then sign in again",
            ErrorCategory::Server => {
                "The service returned an unexpected response. Please try again later"
            }
            ErrorCategory::Client => "Please check your input and try again",
            ErrorCategory::Configuration => "Check your credentials and configuration settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
