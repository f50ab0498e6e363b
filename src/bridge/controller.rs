//! Bridge token acquisition.
//!
//! The controller derives the session token from four inputs: the selected
//! product, the active client id, the active access key and the product
//! settings. Whenever that tuple changes a new token is requested.
//!
//! Requests are never cancelled. Each one is tagged with a generation
//! number when issued, and its response is published only if no newer
//! generation has been issued since. A slow response for an old tuple is
//! therefore dropped instead of overwriting a fresher token.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::api::{BridgeApiClient, BridgeTokenRequest};
use crate::models::{BridgeToken, Credentials, ProductSettings, ProductType};
use crate::state::{SettingsSnapshot, SettingsStore};
use crate::traits::HttpClient;

/// The slice of state a bridge token depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDependencies {
    pub product: ProductType,
    pub credentials: Credentials,
    pub settings: ProductSettings,
}

impl TokenDependencies {
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        Self {
            product: snapshot.product,
            credentials: snapshot.active_credentials().clone(),
            settings: snapshot.product_settings.clone(),
        }
    }
}

/// How a single token request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Token published to the store.
    Applied,
    /// Token arrived after a newer request was issued and was dropped.
    Stale,
    /// Transport, status or parse failure. Nothing published.
    Failed,
}

/// Keeps the store's session token in sync with its dependencies.
pub struct TokenController<C> {
    store: SettingsStore,
    api: Arc<BridgeApiClient<C>>,
    generation: Arc<AtomicU64>,
}

impl<C> Clone for TokenController<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            api: Arc::clone(&self.api),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<C: HttpClient + 'static> TokenController<C> {
    pub fn new(store: SettingsStore, api: BridgeApiClient<C>) -> Self {
        Self {
            store,
            api: Arc::new(api),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generation of the most recently observed change.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// React to a change of the dependency tuple.
    ///
    /// Returns `None` when the credentials are incomplete. In that case no
    /// request is sent and the current token is left alone, but any request
    /// still in flight becomes stale.
    ///
    /// Otherwise the token is cleared and a request is spawned; the handle
    /// resolves to the request's outcome.
    pub fn refresh(&self, deps: TokenDependencies) -> Option<JoinHandle<RequestOutcome>> {
        let tag = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !deps.credentials.is_complete() {
            tracing::debug!(generation = tag, "credentials incomplete, skipping token request");
            return None;
        }

        self.store.clear_token();

        let store = self.store.clone();
        let api = Arc::clone(&self.api);
        let generation = Arc::clone(&self.generation);

        Some(tokio::spawn(async move {
            let request = BridgeTokenRequest::from_settings(deps.product, &deps.settings);
            tracing::info!(generation = tag, product = %deps.product, "getting bridge token");

            match api.create_bridge_token(&deps.credentials, &request).await {
                Ok(token) => {
                    let applied = store.publish_token_if(token, || {
                        generation.load(Ordering::SeqCst) == tag
                    });
                    if applied {
                        tracing::info!(generation = tag, "got bridge token");
                        RequestOutcome::Applied
                    } else {
                        tracing::debug!(generation = tag, "discarding stale bridge token");
                        RequestOutcome::Stale
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        generation = tag,
                        category = %e.category(),
                        "failed to get bridge token: {}",
                        e
                    );
                    RequestOutcome::Failed
                }
            }
        }))
    }

    /// Request a token for the store's current state and wait for that
    /// request alone.
    ///
    /// Returns as soon as the request ends. `None` if the credentials are
    /// incomplete, the request failed or was superseded, or `timeout`
    /// elapsed first.
    pub async fn refresh_and_wait(&self, timeout: Duration) -> Option<BridgeToken> {
        let handle = self.refresh(TokenDependencies::from_snapshot(&self.store.snapshot()))?;

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(RequestOutcome::Applied)) => self.store.session_token(),
            Ok(Ok(_)) => None,
            Ok(Err(e)) => {
                tracing::warn!("token request task failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(?timeout, "gave up waiting for bridge token");
                None
            }
        }
    }

    /// Observe the store and refresh on every change of the dependencies.
    ///
    /// Runs once for the state at call time, then again whenever a store
    /// update alters the tuple. Updates to unrelated fields are ignored.
    /// Returns when the store is dropped.
    pub async fn run(self) {
        let mut rx = self.store.subscribe();
        let mut last = TokenDependencies::from_snapshot(&rx.borrow_and_update());
        self.refresh(last.clone());

        while rx.changed().await.is_ok() {
            let deps = TokenDependencies::from_snapshot(&rx.borrow_and_update());
            if deps != last {
                last = deps.clone();
                self.refresh(deps);
            }
        }
    }

    /// Run the controller on a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
