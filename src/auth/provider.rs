//! Authorization decision procedure.
//!
//! Given the token store and the current time, [`plan_authorization`] returns
//! the flows that must run, in order, before a request can be authorized. The
//! decision is recomputed on every call; only the tokens are cached.
//!
//! A client is on exactly one of two paths:
//!
//! - **automation path** (the store holds an automation token): nothing to do
//!   while that token is usable; otherwise bring the access token up to date
//!   and mint a new automation token from it.
//! - **interactive path**: sign in when no session exists, refresh when the
//!   access token is expired, otherwise nothing.

use chrono::{DateTime, Duration, Utc};

use super::store::TokenStore;

/// Safety margins subtracted from token expiries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub access_margin: Duration,
    pub automation_margin: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            access_margin: Duration::minutes(5),
            automation_margin: Duration::minutes(5),
        }
    }
}

/// One credential state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    /// Password sign-in producing access + refresh tokens.
    SignIn,
    /// Refresh-token exchange producing rotated access + refresh tokens.
    Refresh,
    /// Automation token minted from a valid access token.
    MintAutomation,
}

impl AuthStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStep::SignIn => "sign-in",
            AuthStep::Refresh => "refresh",
            AuthStep::MintAutomation => "automation token",
        }
    }
}

/// Flows to run before a request may be authorized.
pub fn plan_authorization(
    store: &TokenStore,
    now: DateTime<Utc>,
    policy: &TokenPolicy,
) -> Vec<AuthStep> {
    if store.is_automation_delegated() {
        if !store.is_automation_token_expired(now, policy) {
            return Vec::new();
        }
        let mut steps = plan_access(store, now, policy);
        steps.push(AuthStep::MintAutomation);
        return steps;
    }
    plan_access(store, now, policy)
}

/// Flows that make the access token usable.
pub fn plan_access(store: &TokenStore, now: DateTime<Utc>, policy: &TokenPolicy) -> Vec<AuthStep> {
    if store.access().is_none() && store.refresh().is_none() {
        return vec![AuthStep::SignIn];
    }
    if !store.is_access_token_expired(now, policy) {
        return Vec::new();
    }
    if store.refresh().is_some() {
        vec![AuthStep::Refresh]
    } else {
        vec![AuthStep::SignIn]
    }
}
