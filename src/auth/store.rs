//! In-memory credential state of one client.

use chrono::{DateTime, Utc};
use std::fmt;

use super::password::hash_password;
use super::provider::TokenPolicy;
use super::token::IssuedToken;
use crate::error::{MultiloginError, MultiloginResult};

/// Email plus one-way password credential used by the interactive flows.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    email: String,
    password_hash: String,
}

impl Identity {
    /// Build an identity from a raw password, hashing it immediately.
    pub fn new(email: &str, password: &str) -> MultiloginResult<Self> {
        if email.is_empty() || password.is_empty() {
            return Err(MultiloginError::Configuration(
                "email and password cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            email: email.to_string(),
            password_hash: hash_password(password),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Access, refresh and automation tokens held by one client.
///
/// Every write replaces whole fields; nothing is appended or merged. The
/// "best token" is computed on demand and never stored.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    access: Option<IssuedToken>,
    refresh: Option<String>,
    automation: Option<IssuedToken>,
}

impl TokenStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a pre-issued automation token.
    pub fn with_automation(token: IssuedToken) -> Self {
        Self {
            automation: Some(token),
            ..Self::default()
        }
    }

    pub fn access(&self) -> Option<&IssuedToken> {
        self.access.as_ref()
    }

    pub fn refresh(&self) -> Option<&str> {
        self.refresh.as_deref()
    }

    pub fn automation(&self) -> Option<&IssuedToken> {
        self.automation.as_ref()
    }

    /// Whether this store is automation-delegated (holds an automation token).
    pub fn is_automation_delegated(&self) -> bool {
        self.automation.is_some()
    }

    /// Overwrite the interactive session with a new access/refresh pair.
    pub fn set_session(&mut self, access: IssuedToken, refresh: String) {
        self.access = Some(access);
        self.refresh = Some(refresh);
    }

    /// Overwrite the automation token.
    pub fn set_automation(&mut self, token: IssuedToken) {
        self.automation = Some(token);
    }

    /// Whether the access token is absent or inside its safety margin.
    pub fn is_access_token_expired(&self, now: DateTime<Utc>, policy: &TokenPolicy) -> bool {
        !self
            .access
            .as_ref()
            .is_some_and(|t| t.is_usable_at(now, policy.access_margin))
    }

    /// Whether the automation token is absent or inside its safety margin.
    pub fn is_automation_token_expired(&self, now: DateTime<Utc>, policy: &TokenPolicy) -> bool {
        !self
            .automation
            .as_ref()
            .is_some_and(|t| t.is_usable_at(now, policy.automation_margin))
    }

    /// Token to present right now: a usable automation token first, then a
    /// usable access token.
    pub fn best_token(&self, now: DateTime<Utc>, policy: &TokenPolicy) -> Option<&str> {
        if !self.is_automation_token_expired(now, policy) {
            return self.automation.as_ref().map(IssuedToken::value);
        }
        if !self.is_access_token_expired(now, policy) {
            return self.access.as_ref().map(IssuedToken::value);
        }
        None
    }

    /// Read-only summary for display.
    pub fn status(&self, now: DateTime<Utc>, policy: &TokenPolicy) -> TokenStatus {
        TokenStatus {
            access_expires_at: self.access.as_ref().map(IssuedToken::expires_at),
            access_usable: !self.is_access_token_expired(now, policy),
            has_refresh_token: self.refresh.is_some(),
            automation_expires_at: self.automation.as_ref().map(IssuedToken::expires_at),
            automation_usable: !self.is_automation_token_expired(now, policy),
        }
    }
}

/// Snapshot of which tokens a client holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus {
    pub access_expires_at: Option<DateTime<Utc>>,
    pub access_usable: bool,
    pub has_refresh_token: bool,
    pub automation_expires_at: Option<DateTime<Utc>>,
    pub automation_usable: bool,
}

impl TokenStatus {
    /// Whether any token can be presented right now.
    pub fn is_authorized(&self) -> bool {
        self.access_usable || self.automation_usable
    }
}
