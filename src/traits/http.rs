//! Outbound HTTP seam.
//!
//! The bridge token client only ever sends one kind of request: a JSON POST
//! whose answer is a status and a body. Anything richer stays inside the
//! adapter.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Request headers by name.
pub type Headers = HashMap<String, String>;

/// Status and body of a completed exchange.
///
/// Any status is a completed exchange, including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The exchange did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("could not connect: {0}")]
    ConnectionFailed(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("bad request URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Other(String),
}

/// Sends JSON POST requests.
///
/// Implemented by [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient)
/// and by [`MockHttpClient`](crate::adapters::MockHttpClient) in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` to `url`.
    ///
    /// A non-2xx status still yields `Ok`; only transport failures are errors.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}
