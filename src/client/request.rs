//! Request building and execution.
//!
//! [`ApiTransport`] turns an [`ApiRequest`] into an HTTP call: it resolves the
//! base URL, encodes query parameters, serializes the JSON body, sets the
//! standard headers, attaches a bearer token when one is supplied and decodes
//! the response envelope. Deciding *which* token to attach is the client's job.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::auth::token::token_preview;
use crate::config::ClientConfig;
use crate::error::{MultiloginError, MultiloginResult};
use crate::models::Envelope;
use crate::traits::{HttpClient, HttpError, HttpMethod, HttpRequest};

/// Query parameters; setting a key twice keeps the last value.
pub type QueryParams = BTreeMap<String, String>;

/// Which service a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Account API (tokens, workspace).
    Api,
    /// Local launcher agent (profile start/stop).
    Launcher,
}

/// Description of one outbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub target: Target,
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: QueryParams,
    pub body: Option<String>,
    pub requires_auth: bool,
}

impl ApiRequest {
    /// Authorized request without body or query parameters.
    pub fn new(target: Target, method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            target,
            method,
            endpoint: endpoint.into(),
            query: QueryParams::new(),
            body: None,
            requires_auth: true,
        }
    }

    pub fn get(target: Target, endpoint: impl Into<String>) -> Self {
        Self::new(target, HttpMethod::Get, endpoint)
    }

    pub fn post(target: Target, endpoint: impl Into<String>) -> Self {
        Self::new(target, HttpMethod::Post, endpoint)
    }

    /// Set (or overwrite) a query parameter.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> MultiloginResult<Self> {
        let encoded = serde_json::to_string(body).map_err(|e| {
            MultiloginError::InvalidArgument(format!("request body is not serializable: {}", e))
        })?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Send without an `Authorization` header.
    pub fn without_auth(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

/// Shared HTTP client plus the resolved base URLs.
#[derive(Clone)]
pub struct ApiTransport {
    http: Arc<dyn HttpClient>,
    api_base: String,
    launcher_base: String,
}

impl ApiTransport {
    pub fn new(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            http,
            api_base: config.api_base(),
            launcher_base: config.launcher_base(),
        }
    }

    /// Replace the HTTP client, keeping the base URLs.
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    fn base(&self, target: Target) -> &str {
        match target {
            Target::Api => &self.api_base,
            Target::Launcher => &self.launcher_base,
        }
    }

    /// Absolute URL of a request, query string included.
    pub fn url_for(&self, request: &ApiRequest) -> MultiloginResult<String> {
        let raw = format!("{}{}", self.base(request.target), request.endpoint);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url.to_string())
    }

    /// Build the HTTP request, attaching `bearer` when given.
    pub fn build(&self, request: &ApiRequest, bearer: Option<&str>) -> MultiloginResult<HttpRequest> {
        let mut http_request = HttpRequest::new(request.method, self.url_for(request)?)
            .with_header("Accept", "application/json");

        if let Some(body) = &request.body {
            http_request = http_request
                .with_header("Content-Type", "application/json")
                .with_body(body.clone());
        }

        if let Some(token) = bearer {
            http_request = http_request.with_header("Authorization", format!("Bearer {}", token));
        }

        Ok(http_request)
    }

    /// Execute a request and decode its envelope.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> MultiloginResult<Envelope<T>> {
        let http_request = self.build(request, bearer)?;
        let bearer_preview = bearer.map_or_else(|| "none".to_string(), token_preview);
        tracing::debug!(
            method = %http_request.method,
            url = %http_request.url,
            bearer = %bearer_preview,
            "Sending request"
        );

        let response = self.http.send(http_request).await?;
        if response.is_success() {
            tracing::debug!(status = response.status, endpoint = %request.endpoint, "Received response");
        } else {
            tracing::debug!(
                status = response.status,
                endpoint = %request.endpoint,
                "Non-2xx transport status, decoding envelope anyway"
            );
        }

        Envelope::decode(&request.endpoint, &response.body)
    }
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport")
            .field("api_base", &self.api_base)
            .field("launcher_base", &self.launcher_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};

    fn transport(mock: &MockHttpClient) -> ApiTransport {
        let config = ClientConfig::default()
            .with_api_url("https://api.example.com/")
            .with_launcher_url("http://127.0.0.1")
            .with_launcher_port(45001);
        ApiTransport::new(Arc::new(mock.clone()), &config)
    }

    #[test]
    fn test_url_for_targets() {
        let mock = MockHttpClient::new();
        let transport = transport(&mock);

        let api = ApiRequest::post(Target::Api, "/user/signin");
        assert_eq!(
            transport.url_for(&api).unwrap(),
            "https://api.example.com/user/signin"
        );

        let launcher = ApiRequest::get(Target::Launcher, "/api/v1/profile/stop_all")
            .query("type", "all");
        assert_eq!(
            transport.url_for(&launcher).unwrap(),
            "http://127.0.0.1:45001/api/v1/profile/stop_all?type=all"
        );
    }

    #[test]
    fn test_query_keys_are_overwritten_and_encoded() {
        let mock = MockHttpClient::new();
        let transport = transport(&mock);
        let request = ApiRequest::get(Target::Api, "/search")
            .query("q", "first")
            .query("q", "a b&c");

        assert_eq!(request.query.len(), 1);
        assert_eq!(
            transport.url_for(&request).unwrap(),
            "https://api.example.com/search?q=a+b%26c"
        );
    }

    #[test]
    fn test_headers_without_body() {
        let mock = MockHttpClient::new();
        let request = transport(&mock)
            .build(&ApiRequest::get(Target::Api, "/x"), None)
            .unwrap();

        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("Content-Type"), None);
        assert_eq!(request.header("Authorization"), None);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_headers_with_body_and_bearer() {
        let mock = MockHttpClient::new();
        let api_request = ApiRequest::post(Target::Api, "/x")
            .json(&serde_json::json!({"k": "v"}))
            .unwrap();
        let request = transport(&mock).build(&api_request, Some("tok")).unwrap();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(request.body.as_deref(), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn test_invalid_base_url_is_transport_error() {
        let mock = MockHttpClient::new();
        let config = ClientConfig::default().with_api_url("not a url");
        let transport = ApiTransport::new(Arc::new(mock), &config);
        let result = transport.url_for(&ApiRequest::get(Target::Api, "/x"));
        assert!(matches!(
            result,
            Err(MultiloginError::Transport(HttpError::InvalidUrl(_)))
        ));
    }

    #[tokio::test]
    async fn test_execute_decodes_envelope() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Get,
            "/thing",
            MockResponse::json(
                200,
                serde_json::json!({"status": {"http_code": 200}, "data": {"n": 3}}),
            ),
        );

        let envelope: Envelope<serde_json::Value> = transport(&mock)
            .execute(&ApiRequest::get(Target::Api, "/thing"), None)
            .await
            .unwrap();
        assert_eq!(envelope.into_data().unwrap()["n"], 3);
    }

    #[tokio::test]
    async fn test_execute_passes_transport_errors_through() {
        let mock = MockHttpClient::new();
        mock.push_response(
            HttpMethod::Get,
            "/slow",
            MockResponse::Error(HttpError::Timeout("30s".to_string())),
        );
        let result: MultiloginResult<Envelope<serde_json::Value>> = transport(&mock)
            .execute(&ApiRequest::get(Target::Api, "/slow"), None)
            .await;
        assert!(matches!(
            result,
            Err(MultiloginError::Transport(HttpError::Timeout(_)))
        ));
    }
}
