//! Common test utilities for integration tests.

#![allow(dead_code)]

use citadel_demo::adapters::mock::MockHttpClient;
use citadel_demo::bridge::{BridgeApiClient, TokenController, TokenDependencies};
use citadel_demo::models::{Credentials, Environment};
use citadel_demo::state::SettingsStore;

pub const TEST_HOST: &str = "http://citadel.test";

/// Credentials that pass the completeness check.
pub fn test_credentials() -> Credentials {
    Credentials::new("test-client-id", "test-access-key")
}

/// A store whose active (sandbox) environment has complete credentials.
pub fn store_with_credentials() -> SettingsStore {
    let store = SettingsStore::new();
    store.set_credentials(Environment::Sandbox, test_credentials());
    store
}

/// Controller wired to a mock HTTP client.
pub fn mock_controller(
    store: &SettingsStore,
    http: &MockHttpClient,
) -> TokenController<MockHttpClient> {
    TokenController::new(
        store.clone(),
        BridgeApiClient::with_base_url(http.clone(), TEST_HOST),
    )
}

/// Current dependency tuple of `store`.
pub fn deps(store: &SettingsStore) -> TokenDependencies {
    TokenDependencies::from_snapshot(&store.snapshot())
}

/// Let spawned tasks on the current-thread runtime make progress.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
