//! Payloads of the token endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /user/signin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    /// MD5 hex digest of the password, never the raw password.
    pub password: &'a str,
}

/// Body of `POST /user/refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshRequest<'a> {
    pub email: &'a str,
    pub refresh_token: &'a str,
}

/// `data` of the sign-in and refresh responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    pub refresh_token: String,
    pub token: String,
}

/// `data` of the automation token response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationData {
    pub token: String,
}
