//! Common test utilities for integration tests.
//!
//! Clients built here talk to a `wiremock` server through the real reqwest
//! adapter and read time from a [`MockClock`] so expiry boundaries are exact.

#![allow(dead_code)]

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::sync::Arc;
use wiremock::MockServer;

use multilogin::adapters::MockClock;
use multilogin::{ClientConfig, MultiloginClient};

/// Fixed reference expiry used across tests.
pub const EXP: i64 = 1_700_000_000;

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "pw";
/// MD5 hex digest of [`PASSWORD`].
pub const PASSWORD_HASH: &str = "8fe4c11451281c094a6578e6ddbf5eed";

/// Unsigned JWT-shaped token expiring at `exp`.
pub fn jwt(exp: i64, tag: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{},"jti":"{}"}}"#, exp, tag)),
        URL_SAFE_NO_PAD.encode("signature")
    )
}

/// Successful envelope around `data`.
pub fn ok(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "status": {"error_code": "", "http_code": 200, "message": "ok"},
        "data": data
    })
}

/// Failure envelope; the transport status stays 200 as the service does.
pub fn failed(http_code: i64, error_code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "status": {"error_code": error_code, "http_code": http_code, "message": message},
        "data": {}
    })
}

/// Sign-in / refresh response data.
pub fn session(exp: i64, tag: &str, refresh_token: &str) -> serde_json::Value {
    ok(serde_json::json!({"token": jwt(exp, tag), "refresh_token": refresh_token}))
}

/// Configuration pointing both API and launcher at `server`.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default()
        .with_api_url(server.uri())
        .with_launcher_url("http://127.0.0.1")
        .with_launcher_port(server.address().port())
}

pub fn interactive_client(server: &MockServer, clock: &MockClock) -> MultiloginClient {
    MultiloginClient::with_config(EMAIL, PASSWORD, config_for(server))
        .expect("valid identity")
        .with_clock(Arc::new(clock.clone()))
}

pub fn automation_client(server: &MockServer, clock: &MockClock, token: &str) -> MultiloginClient {
    MultiloginClient::from_automation_token_with_config(token, config_for(server))
        .expect("valid automation token")
        .with_clock(Arc::new(clock.clone()))
}
