//! Mock HTTP client for testing.
//!
//! Responses come from two places, checked in order:
//! 1. the planned-response queue ([`MockHttpClient::push_response`],
//!    [`MockHttpClient::defer_response`]), first matching entry wins;
//! 2. the default response.
//!
//! Deferred responses let a test hold a request open and release it later,
//! which is how out-of-order completions are simulated.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A 200 response with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Success(Response::new(200, value.to_string()))
    }

    /// A 200 response carrying `{"bridge_token": token}`.
    pub fn bridge_token(token: &str) -> Self {
        Self::json(serde_json::json!({ "bridge_token": token }))
    }

    fn into_result(self) -> Result<Response, HttpError> {
        match self {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[derive(Debug)]
enum Planned {
    Ready(MockResponse),
    Deferred(oneshot::Receiver<MockResponse>),
}

#[derive(Debug)]
struct PlannedEntry {
    body_contains: Option<String>,
    planned: Planned,
}

impl PlannedEntry {
    fn matches(&self, body: &str) -> bool {
        self.body_contains
            .as_deref()
            .map_or(true, |needle| body.contains(needle))
    }
}

/// Handle used to complete a deferred request.
#[derive(Debug)]
pub struct DeferredResponse {
    tx: oneshot::Sender<MockResponse>,
}

impl DeferredResponse {
    /// Release the held request with `response`.
    ///
    /// Resolving before the request arrives is fine; the response is
    /// buffered until then.
    pub fn resolve(self, response: MockResponse) {
        let _ = self.tx.send(response);
    }
}

/// Mock HTTP client for testing.
///
/// Clones share configuration and recorded requests.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    default_response: Arc<Mutex<Option<MockResponse>>>,
    planned: Arc<Mutex<VecDeque<PlannedEntry>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Response for every request the planned queue does not answer.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Queue a one-shot response for the next request.
    pub fn push_response(&self, response: MockResponse) {
        self.plan(None, Planned::Ready(response));
    }

    /// Hold the next request open until the returned handle is resolved.
    pub fn defer_response(&self) -> DeferredResponse {
        self.defer(None)
    }

    /// Hold the next request whose body contains `needle`.
    pub fn defer_response_matching(&self, needle: &str) -> DeferredResponse {
        self.defer(Some(needle.to_string()))
    }

    fn defer(&self, body_contains: Option<String>) -> DeferredResponse {
        let (tx, rx) = oneshot::channel();
        self.plan(body_contains, Planned::Deferred(rx));
        DeferredResponse { tx }
    }

    fn plan(&self, body_contains: Option<String>, planned: Planned) {
        self.planned.lock().unwrap().push_back(PlannedEntry {
            body_contains,
            planned,
        });
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn take_planned(&self, body: &str) -> Option<Planned> {
        let mut planned = self.planned.lock().unwrap();
        let index = planned.iter().position(|entry| entry.matches(body))?;
        planned.remove(index).map(|entry| entry.planned)
    }

    fn default_response(&self) -> Option<MockResponse> {
        self.default_response.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request(url, headers, Some(body.to_string()));

        let planned = self.take_planned(body);
        match planned {
            Some(Planned::Ready(response)) => response.into_result(),
            Some(Planned::Deferred(rx)) => match rx.await {
                Ok(response) => response.into_result(),
                Err(_) => Err(HttpError::Other("Deferred response dropped".to_string())),
            },
            None => match self.default_response() {
                Some(response) => response.into_result(),
                None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
            },
        }
    }
}
