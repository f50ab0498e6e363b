//! [`HttpClient`] backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;

use crate::cli::VERSION;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Per-request timeout for the token service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("citadel-demo/{}", VERSION))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            HttpError::Timeout(message)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(message)
        } else if err.is_builder() {
            HttpError::InvalidUrl(message)
        } else {
            HttpError::Other(message)
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        let request = headers
            .iter()
            .fold(self.client.post(url), |req, (name, value)| req.header(name, value))
            .body(body.to_owned());

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(url, status, bytes = body.len(), "POST completed");
        Ok(Response::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("X-Access-Client-Id", "abc"))
            .and(body_string(r#"{"product_type":"income"}"#))
            .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
            .mount(&server)
            .await;

        let mut headers = Headers::new();
        headers.insert("X-Access-Client-Id".to_string(), "abc".to_string());

        let response = ReqwestHttpClient::new()
            .post(&server.uri(), r#"{"product_type":"income"}"#, &headers)
            .await
            .unwrap();
        assert_eq!(response.status, 418);
        assert_eq!(response.text(), "teapot");
    }

    #[tokio::test]
    async fn test_post_invalid_url() {
        let result = ReqwestHttpClient::new()
            .post("not-a-valid-url", "{}", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_post_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let result = ReqwestHttpClient::with_timeout(Duration::from_millis(100))
            .post(&server.uri(), "{}", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }
}
