//! Bridge token acquisition.

pub mod api;
pub mod controller;

pub use api::{
    BridgeAccount, BridgeApiClient, BridgeApiError, BridgeTokenRequest, BridgeTokenResponse,
    BRIDGE_TOKENS_PATH, DEFAULT_API_HOST,
};
pub use controller::{RequestOutcome, TokenController, TokenDependencies};
