//! Sign-in, refresh and automation-token flows.
//!
//! Each flow performs one call, checks the envelope status and decodes the
//! expiry of every returned token before handing anything back. The caller
//! writes the result into its [`TokenStore`](super::TokenStore) only on
//! success, so a failed flow never leaves a partial update behind.

use serde::de::DeserializeOwned;

use super::store::Identity;
use super::token::IssuedToken;
use crate::client::request::{ApiRequest, ApiTransport, Target};
use crate::error::{MultiloginError, MultiloginResult};
use crate::models::{AuthData, AutomationData, Envelope, RefreshRequest, SignInRequest};

pub const SIGNIN_ENDPOINT: &str = "/user/signin";
pub const REFRESH_ENDPOINT: &str = "/user/refresh_token";
pub const AUTOMATION_TOKEN_ENDPOINT: &str = "/automation_token";

/// Access and refresh tokens returned by sign-in or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access: IssuedToken,
    pub refresh: String,
}

impl Session {
    fn from_auth_data(data: AuthData) -> MultiloginResult<Self> {
        let access = IssuedToken::parse(data.token)?;
        Ok(Self {
            access,
            refresh: data.refresh_token,
        })
    }
}

/// Exchange email and password hash for a new session.
pub async fn sign_in(transport: &ApiTransport, identity: &Identity) -> MultiloginResult<Session> {
    tracing::debug!(email = %identity.email(), "Signing in");

    let request = ApiRequest::post(Target::Api, SIGNIN_ENDPOINT)
        .json(&SignInRequest {
            email: identity.email(),
            password: identity.password_hash(),
        })?
        .without_auth();

    let data: AuthData = call("sign-in", transport, &request, None).await?;
    let session = Session::from_auth_data(data)?;

    tracing::info!(
        access_expires_at = %session.access.expires_at(),
        "Signed in"
    );
    Ok(session)
}

/// Exchange the current refresh token for a rotated session.
pub async fn refresh(
    transport: &ApiTransport,
    identity: &Identity,
    refresh_token: &str,
) -> MultiloginResult<Session> {
    tracing::debug!(email = %identity.email(), "Refreshing access token");

    let request = ApiRequest::post(Target::Api, REFRESH_ENDPOINT)
        .json(&RefreshRequest {
            email: identity.email(),
            refresh_token,
        })?
        .without_auth();

    let data: AuthData = call("refresh", transport, &request, None).await?;
    let session = Session::from_auth_data(data)?;

    tracing::info!(
        access_expires_at = %session.access.expires_at(),
        "Access token refreshed"
    );
    Ok(session)
}

/// Mint an automation token, authorized by a usable access token.
pub async fn mint_automation(
    transport: &ApiTransport,
    access_token: &str,
    expiration_period: &str,
) -> MultiloginResult<IssuedToken> {
    tracing::debug!(expiration_period, "Minting automation token");

    let request = ApiRequest::get(Target::Api, AUTOMATION_TOKEN_ENDPOINT)
        .query("expiration_period", expiration_period);

    let data: AutomationData =
        call("automation token", transport, &request, Some(access_token)).await?;
    let token = IssuedToken::parse(data.token)?;

    tracing::info!(expires_at = %token.expires_at(), "Automation token issued");
    Ok(token)
}

async fn call<T: DeserializeOwned>(
    flow: &'static str,
    transport: &ApiTransport,
    request: &ApiRequest,
    bearer: Option<&str>,
) -> MultiloginResult<T> {
    let envelope: Envelope<T> = transport.execute(request, bearer).await?;

    if !envelope.status.is_success() {
        tracing::warn!(
            flow,
            http_code = envelope.status.http_code,
            error_code = %envelope.status.error_code,
            "Authentication flow rejected: {}",
            envelope.status.message
        );
        return Err(MultiloginError::Authentication {
            flow,
            http_code: envelope.status.http_code,
            error_code: envelope.status.error_code,
            message: envelope.status.message,
        });
    }

    envelope.data.ok_or_else(|| {
        MultiloginError::protocol(&request.endpoint, "success response without data")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::auth::store::test_tokens::jwt;
    use crate::config::ClientConfig;
    use crate::traits::HttpMethod;
    use serde_json::json;
    use std::sync::Arc;

    const EXP: i64 = 1_700_000_000;

    fn transport(mock: &MockHttpClient) -> ApiTransport {
        ApiTransport::new(
            Arc::new(mock.clone()),
            &ClientConfig::default().with_api_url("https://api.test"),
        )
    }

    fn identity() -> Identity {
        Identity::new("a@b.com", "pw").unwrap()
    }

    fn ok(data: serde_json::Value) -> MockResponse {
        MockResponse::json(
            200,
            json!({"status": {"error_code": "", "http_code": 200, "message": "ok"}, "data": data}),
        )
    }

    fn rejected(code: i64, message: &str) -> MockResponse {
        MockResponse::json(
            200,
            json!({"status": {"error_code": "UNAUTHORIZED_REQUEST", "http_code": code, "message": message}, "data": {}}),
        )
    }

    #[tokio::test]
    async fn test_sign_in_sends_hash_and_parses_tokens() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Post,
            SIGNIN_ENDPOINT,
            ok(json!({"token": jwt(EXP, "a"), "refresh_token": "r1"})),
        );

        let session = sign_in(&transport(&mock), &identity()).await.unwrap();
        assert_eq!(session.access.value(), jwt(EXP, "a"));
        assert_eq!(session.access.expires_at().timestamp(), EXP);
        assert_eq!(session.refresh, "r1");

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].json_body().unwrap(),
            json!({"email": "a@b.com", "password": "8fe4c11451281c094a6578e6ddbf5eed"})
        );
        assert_eq!(requests[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let mock = MockHttpClient::new();
        mock.push_response(HttpMethod::Post, SIGNIN_ENDPOINT, rejected(401, "Wrong credentials"));

        let err = sign_in(&transport(&mock), &identity()).await.unwrap_err();
        match err {
            MultiloginError::Authentication {
                flow,
                http_code,
                message,
                ..
            } => {
                assert_eq!(flow, "sign-in");
                assert_eq!(http_code, 401);
                assert_eq!(message, "Wrong credentials");
            }
            other => panic!("expected Authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sign_in_with_malformed_token() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Post,
            SIGNIN_ENDPOINT,
            ok(json!({"token": "not-a-jwt", "refresh_token": "r1"})),
        );

        let err = sign_in(&transport(&mock), &identity()).await.unwrap_err();
        assert!(matches!(err, MultiloginError::TokenFormat(_)));
    }

    #[tokio::test]
    async fn test_refresh_sends_refresh_token() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Post,
            REFRESH_ENDPOINT,
            ok(json!({"token": jwt(EXP + 100, "a2"), "refresh_token": "r2"})),
        );

        let session = refresh(&transport(&mock), &identity(), "r1").await.unwrap();
        assert_eq!(session.refresh, "r2");

        let body = mock.get_requests()[0].json_body().unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "refresh_token": "r1"}));
    }

    #[tokio::test]
    async fn test_mint_automation_uses_bearer_and_period() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Get,
            AUTOMATION_TOKEN_ENDPOINT,
            ok(json!({"token": jwt(EXP, "auto")})),
        );

        let token = mint_automation(&transport(&mock), "access-token", "1h")
            .await
            .unwrap();
        assert_eq!(token.value(), jwt(EXP, "auto"));

        let requests = mock.get_requests();
        assert_eq!(
            requests[0].url,
            "https://api.test/automation_token?expiration_period=1h"
        );
        assert_eq!(requests[0].header("Authorization"), Some("Bearer access-token"));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_success_without_data_is_protocol_error() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Get,
            AUTOMATION_TOKEN_ENDPOINT,
            MockResponse::json(200, json!({"status": {"http_code": 200}})),
        );

        let err = mint_automation(&transport(&mock), "access-token", "1h")
            .await
            .unwrap_err();
        assert!(matches!(err, MultiloginError::Protocol { .. }));
    }
}
