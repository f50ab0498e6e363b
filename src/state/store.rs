//! Process-wide settings store.
//!
//! [`SettingsStore`] is the single source of truth for everything the user
//! edits plus the transient bridge token. It is cheap to clone; all clones
//! share the same state. Observers register through [`SettingsStore::subscribe`]
//! and [`SettingsStore::subscribe_token`] and always see the latest value.
//!
//! Every setter publishes synchronously. Setters that leave the value
//! unchanged do not wake observers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::models::{
    BridgeToken, Credentials, EnvCredentials, Environment, ProductSettings, ProductSettingsPatch,
    ProductType,
};

/// Persisted part of the store.
///
/// The widget flag and the bridge token are session state and never written
/// out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    pub env: Environment,
    pub credentials: EnvCredentials,
    pub product: ProductType,
    pub product_settings: ProductSettings,
    #[serde(skip)]
    pub widget_visible: bool,
}

impl SettingsSnapshot {
    /// Credentials of the active environment.
    pub fn active_credentials(&self) -> &Credentials {
        self.credentials.get(self.env)
    }
}

#[derive(Debug)]
struct StoreInner {
    settings: watch::Sender<SettingsSnapshot>,
    token: watch::Sender<Option<BridgeToken>>,
}

/// Observable settings store shared by the UI, the token controller and the
/// widget gate.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    inner: Arc<StoreInner>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Create a store initialised with defaults.
    pub fn new() -> Self {
        Self::from_snapshot(SettingsSnapshot::default())
    }

    /// Create a store from previously persisted settings.
    ///
    /// The widget always starts hidden and there is never a token yet.
    pub fn from_snapshot(mut snapshot: SettingsSnapshot) -> Self {
        snapshot.widget_visible = false;
        let (settings, _) = watch::channel(snapshot);
        let (token, _) = watch::channel(None);
        Self {
            inner: Arc::new(StoreInner { settings, token }),
        }
    }

    /// A copy of the current settings.
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.inner.settings.borrow().clone()
    }

    /// Register an observer for settings changes.
    pub fn subscribe(&self) -> watch::Receiver<SettingsSnapshot> {
        self.inner.settings.subscribe()
    }

    /// Register an observer for the session token.
    pub fn subscribe_token(&self) -> watch::Receiver<Option<BridgeToken>> {
        self.inner.token.subscribe()
    }

    fn modify(&self, f: impl FnOnce(&mut SettingsSnapshot) -> bool) -> bool {
        self.inner.settings.send_if_modified(f)
    }

    // ---- environment -------------------------------------------------------

    pub fn env(&self) -> Environment {
        self.inner.settings.borrow().env
    }

    /// Switch the active environment. Other environments keep their keys.
    pub fn set_env(&self, env: Environment) {
        let changed = self.modify(|s| replace_if_changed(&mut s.env, env));
        if changed {
            tracing::debug!(env = %env, "environment changed");
        }
    }

    // ---- credentials -------------------------------------------------------

    /// Credentials stored for `env`, possibly empty.
    pub fn credentials(&self, env: Environment) -> Credentials {
        self.inner.settings.borrow().credentials.get(env).clone()
    }

    /// Credentials of the active environment.
    pub fn active_credentials(&self) -> Credentials {
        self.inner.settings.borrow().active_credentials().clone()
    }

    pub fn set_credentials(&self, env: Environment, credentials: Credentials) {
        self.modify(|s| replace_if_changed(s.credentials.get_mut(env), credentials));
    }

    pub fn set_client_id(&self, env: Environment, client_id: impl Into<String>) {
        let client_id = client_id.into();
        self.modify(|s| replace_if_changed(&mut s.credentials.get_mut(env).client_id, client_id));
    }

    pub fn set_access_key(&self, env: Environment, access_key: impl Into<String>) {
        let access_key = access_key.into();
        self.modify(|s| {
            replace_if_changed(&mut s.credentials.get_mut(env).access_key, access_key)
        });
    }

    // ---- product -----------------------------------------------------------

    pub fn product(&self) -> ProductType {
        self.inner.settings.borrow().product
    }

    pub fn set_product(&self, product: ProductType) {
        self.modify(|s| replace_if_changed(&mut s.product, product));
    }

    pub fn product_settings(&self) -> ProductSettings {
        self.inner.settings.borrow().product_settings.clone()
    }

    /// Replace the whole settings object.
    ///
    /// Edit sites that change individual fields go through
    /// [`update_product_settings`](Self::update_product_settings) instead.
    pub fn set_product_settings(&self, settings: ProductSettings) {
        self.modify(|s| replace_if_changed(&mut s.product_settings, settings));
    }

    /// Shallow-merge `patch` into the current settings and publish the result.
    ///
    /// The merge happens under the store's write lock, so concurrent edits
    /// of different fields never drop each other.
    pub fn update_product_settings(&self, patch: ProductSettingsPatch) {
        self.modify(|s| {
            let next = s.product_settings.merged(&patch);
            replace_if_changed(&mut s.product_settings, next)
        });
    }

    // ---- widget ------------------------------------------------------------

    pub fn widget_visible(&self) -> bool {
        self.inner.settings.borrow().widget_visible
    }

    pub fn set_widget_visible(&self, visible: bool) {
        self.modify(|s| replace_if_changed(&mut s.widget_visible, visible));
    }

    // ---- session token -----------------------------------------------------

    /// The current bridge token, `None` while stale or never fetched.
    pub fn session_token(&self) -> Option<BridgeToken> {
        self.inner.token.borrow().clone()
    }

    /// Wait until a token is present, up to `timeout`.
    pub async fn wait_for_token(&self, timeout: Duration) -> Option<BridgeToken> {
        let mut rx = self.subscribe_token();
        let waited = tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await;
        match waited {
            Ok(Ok(token)) => token.clone(),
            _ => None,
        }
    }

    /// Drop the current token so consumers treat it as stale.
    pub(crate) fn clear_token(&self) {
        self.inner.token.send_if_modified(|t| t.take().is_some());
    }

    /// Publish `token` if `still_current` holds.
    ///
    /// The check runs under the token's write lock, so a clear issued by a
    /// newer request either happens before the check or after the write.
    pub(crate) fn publish_token_if(
        &self,
        token: BridgeToken,
        still_current: impl FnOnce() -> bool,
    ) -> bool {
        let mut applied = false;
        self.inner.token.send_if_modified(|t| {
            if !still_current() {
                return false;
            }
            applied = true;
            replace_if_changed(t, Some(token))
        });
        applied
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
