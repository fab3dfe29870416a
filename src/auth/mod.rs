//! Token lifecycle for the Multilogin client.
//!
//! This module provides:
//! - Token expiry decoding ([`token`])
//! - Password hashing for sign-in ([`password`])
//! - Identity and token storage ([`store`])
//! - The authorization decision procedure ([`provider`])
//! - Sign-in, refresh and automation-token flows ([`flows`])

pub mod flows;
pub mod password;
pub mod provider;
pub mod store;
pub mod token;

pub use flows::Session;
pub use password::hash_password;
pub use provider::{plan_access, plan_authorization, AuthStep, TokenPolicy};
pub use store::{Identity, TokenStatus, TokenStore};
pub use token::{parse_token_expiry, token_preview, IssuedToken};
