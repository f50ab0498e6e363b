//! Client for the bridge token endpoint.
//!
//! POST {host}/v1/bridge-tokens/ with the client id and secret in headers
//! and the product parameters in a JSON body. The response carries a
//! single `bridge_token` string.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCategory;
use crate::models::{BridgeToken, Credentials, ProductSettings, ProductType};
use crate::traits::{Headers, HttpClient, HttpError};

/// Default host of the token service.
pub const DEFAULT_API_HOST: &str = "https://prod.citadelid.com";

/// Path of the bridge token endpoint.
pub const BRIDGE_TOKENS_PATH: &str = "/v1/bridge-tokens/";

/// Error type for bridge token requests.
#[derive(Debug, thiserror::Error)]
pub enum BridgeApiError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    /// Service answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },
    /// Body could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Response parsed but `bridge_token` was empty
    #[error("Response did not contain a bridge token")]
    MissingToken,
}

impl BridgeApiError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::TokenAcquisitionFailure
    }
}

/// Bank account attached to deposit switch and paycheck linked loan requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeAccount {
    pub account_number: String,
    pub account_type: String,
    pub bank_name: String,
    pub routing_number: String,
}

/// Body of `POST /v1/bridge-tokens/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeTokenRequest {
    pub product_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_mapping_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<BridgeAccount>,
}

impl BridgeTokenRequest {
    /// Build the request for `product` from the user's settings.
    ///
    /// Empty ids are left out of the body entirely. The account object is
    /// only attached when the product needs one; `deposit_value` is never
    /// sent.
    pub fn from_settings(product: ProductType, settings: &ProductSettings) -> Self {
        let account = product.requires_account().then(|| BridgeAccount {
            account_number: settings.account_number.clone(),
            account_type: settings.account_type.clone(),
            bank_name: settings.bank_name.clone(),
            routing_number: settings.routing_number.clone(),
        });

        Self {
            product_type: product,
            provider_id: non_empty(&settings.provider_id),
            company_mapping_id: non_empty(&settings.mapping_id),
            account,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Response from the bridge token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeTokenResponse {
    pub bridge_token: String,
}

/// Client for the token service.
#[derive(Debug, Clone)]
pub struct BridgeApiClient<C> {
    /// Base URL of the token service, without the endpoint path
    pub base_url: String,
    http: C,
}

impl<C: HttpClient> BridgeApiClient<C> {
    /// Client pointed at [`DEFAULT_API_HOST`].
    pub fn new(http: C) -> Self {
        Self::with_base_url(http, DEFAULT_API_HOST)
    }

    /// Client pointed at a custom host.
    pub fn with_base_url(http: C, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Full URL of the bridge token endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), BRIDGE_TOKENS_PATH)
    }

    /// Request a bridge token.
    ///
    /// POST /v1/bridge-tokens/
    ///
    /// The token is returned exactly as the service sent it.
    pub async fn create_bridge_token(
        &self,
        credentials: &Credentials,
        request: &BridgeTokenRequest,
    ) -> Result<BridgeToken, BridgeApiError> {
        let url = self.endpoint();
        let body = serde_json::to_string(request)?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-Access-Client-Id".to_string(), credentials.client_id.clone());
        headers.insert("X-Access-Secret".to_string(), credentials.access_key.clone());

        let response = self.http.post(&url, &body, &headers).await?;

        if !response.is_success() {
            return Err(BridgeApiError::Status {
                status: response.status,
                message: response.text(),
            });
        }

        let data: BridgeTokenResponse = response.json()?;
        BridgeToken::new(data.bridge_token).ok_or(BridgeApiError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::models::ProductSettingsPatch;
    use crate::traits::Response;
    use serde_json::json;

    fn creds() -> Credentials {
        Credentials::new("client-1", "secret-1")
    }

    #[test]
    fn test_endpoint_joins_host_and_path() {
        let client = BridgeApiClient::with_base_url(MockHttpClient::new(), "http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/bridge-tokens/");

        let client = BridgeApiClient::new(MockHttpClient::new());
        assert_eq!(client.endpoint(), "https://prod.citadelid.com/v1/bridge-tokens/");
    }

    #[test]
    fn test_request_omits_empty_ids() {
        let request = BridgeTokenRequest::from_settings(ProductType::Income, &ProductSettings::default());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "product_type": "income" }));
    }

    #[test]
    fn test_request_for_employment_with_mapping_id() {
        let settings = ProductSettings::default()
            .merged(&ProductSettingsPatch::new().mapping_id("539aad839b51435aa8e525fed95f1688"));
        let request = BridgeTokenRequest::from_settings(ProductType::Employment, &settings);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["company_mapping_id"], "539aad839b51435aa8e525fed95f1688");
        assert!(value.get("account").is_none());
        assert!(value.get("provider_id").is_none());
    }

    #[test]
    fn test_request_for_pll_carries_account() {
        let request = BridgeTokenRequest::from_settings(ProductType::Pll, &ProductSettings::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["account"],
            json!({
                "account_number": "160025987",
                "account_type": "checking",
                "bank_name": "TD Bank",
                "routing_number": "123456789",
            })
        );
    }

    #[test]
    fn test_account_only_for_deposit_products() {
        for product in ProductType::ALL {
            let request = BridgeTokenRequest::from_settings(product, &ProductSettings::default());
            assert_eq!(request.account.is_some(), product.requires_account(), "{}", product);
        }
    }

    #[test]
    fn test_deposit_value_is_never_sent() {
        let settings = ProductSettings::default().merged(&ProductSettingsPatch::new().deposit_value(50.0));
        let request = BridgeTokenRequest::from_settings(ProductType::DepositSwitch, &settings);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["product_type"], "deposit_switch");
        assert!(value.get("deposit_value").is_none());
        assert!(value["account"].get("deposit_value").is_none());
    }

    #[tokio::test]
    async fn test_create_bridge_token_sends_headers() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::bridge_token("tok-123"));
        let client = BridgeApiClient::with_base_url(http.clone(), "http://api.test");

        let request = BridgeTokenRequest::from_settings(ProductType::Employment, &ProductSettings::default());
        let token = client.create_bridge_token(&creds(), &request).await.unwrap();
        assert_eq!(token.as_str(), "tok-123");

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://api.test/v1/bridge-tokens/");
        assert_eq!(requests[0].headers["Content-Type"], "application/json");
        assert_eq!(requests[0].headers["X-Access-Client-Id"], "client-1");
        assert_eq!(requests[0].headers["X-Access-Secret"], "secret-1");
        assert_eq!(requests[0].json_body().unwrap()["product_type"], "employment");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(401, "bad key")));
        let client = BridgeApiClient::new(http);

        let request = BridgeTokenRequest::from_settings(ProductType::Admin, &ProductSettings::default());
        let err = client.create_bridge_token(&creds(), &request).await.unwrap_err();
        match err {
            BridgeApiError::Status { status, ref message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "bad key");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
        assert_eq!(err.category(), ErrorCategory::TokenAcquisitionFailure);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(200, "<html>")));
        let client = BridgeApiClient::new(http);

        let request = BridgeTokenRequest::from_settings(ProductType::Fas, &ProductSettings::default());
        let err = client.create_bridge_token(&creds(), &request).await.unwrap_err();
        assert!(matches!(err, BridgeApiError::Json(_)));
    }

    #[tokio::test]
    async fn test_missing_field_and_empty_token() {
        let http = MockHttpClient::new();
        http.push_response(MockResponse::json(json!({ "token": "x" })));
        http.push_response(MockResponse::bridge_token(""));
        let client = BridgeApiClient::new(http);
        let request = BridgeTokenRequest::from_settings(ProductType::Income, &ProductSettings::default());

        let missing = client.create_bridge_token(&creds(), &request).await.unwrap_err();
        assert!(matches!(missing, BridgeApiError::Json(_)));

        let empty = client.create_bridge_token(&creds(), &request).await.unwrap_err();
        assert!(matches!(empty, BridgeApiError::MissingToken));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let client = BridgeApiClient::new(http);
        let request = BridgeTokenRequest::from_settings(ProductType::Income, &ProductSettings::default());

        let err = client.create_bridge_token(&creds(), &request).await.unwrap_err();
        assert!(matches!(err, BridgeApiError::Http(HttpError::ConnectionFailed(_))));
        assert!(err.to_string().contains("refused"));
    }
}
