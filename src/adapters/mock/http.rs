//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that returns predefined responses
//! or errors and records every request it receives.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, HttpMethod, HttpRequest, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Request URL including query string
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, if any
    pub body: Option<String>,
}

impl RecordedRequest {
    /// URL path without scheme, host or query.
    pub fn path(&self) -> &str {
        path_of(&self.url)
    }

    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON response with the given HTTP status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }
}

type RouteKey = (HttpMethod, String);

/// Mock HTTP client for testing.
///
/// Responses are registered per method and URL path. Several responses can be
/// queued for the same route; they are returned in order and the last one is
/// repeated once the queue is drained.
///
/// # Example
///
/// ```ignore
/// use multilogin::adapters::mock::{MockHttpClient, MockResponse};
/// use multilogin::traits::HttpMethod;
///
/// let client = MockHttpClient::new();
/// client.push_response(
///     HttpMethod::Post,
///     "/user/signin",
///     MockResponse::json(200, serde_json::json!({"status": {"http_code": 200}})),
/// );
///
/// // ... exercise the code under test ...
///
/// assert_eq!(client.count_requests(HttpMethod::Post, "/user/signin"), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by route
    responses: Arc<Mutex<HashMap<RouteKey, VecDeque<MockResponse>>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for a method and path.
    pub fn push_response(&self, method: HttpMethod, path: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        responses
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of recorded requests for a method and path.
    pub fn count_requests(&self, method: HttpMethod, path: &str) -> usize {
        self.get_requests()
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
    }

    fn next_response(&self, method: HttpMethod, path: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        let queue = responses.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        let path = path_of(&request.url).to_string();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                method: request.method,
                url: request.url.clone(),
                headers: request.headers,
                body: request.body,
            });

        match self.next_response(request.method, &path) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::ConnectionFailed(format!(
                "No mock response for {} {}",
                request.method, request.url
            ))),
        }
    }
}

fn path_of(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx..],
        None => "/",
    }
}
