//! Application configuration.
//!
//! Values read from the process environment override whatever the settings
//! file holds. Unset or empty variables leave the stored value alone.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `CITADEL_API_HOST` | token service host |
//! | `CITADEL_ENV` | active environment (`sandbox`, `dev`, `prod`) |
//! | `CITADEL_CLIENT_ID` | client id, applied to every environment |
//! | `CITADEL_SANDBOX_KEY` | sandbox access key |
//! | `CITADEL_DEV_KEY` | development access key |
//! | `CITADEL_PROD_KEY` | production access key |
//! | `CITADEL_TOKEN_TIMEOUT` | seconds to wait for a token |

use std::time::Duration;

use crate::bridge::DEFAULT_API_HOST;
use crate::error::ConfigError;
use crate::models::Environment;
use crate::state::SettingsStore;

pub const API_HOST_VAR: &str = "CITADEL_API_HOST";
pub const ENV_VAR: &str = "CITADEL_ENV";
pub const CLIENT_ID_VAR: &str = "CITADEL_CLIENT_ID";
pub const SANDBOX_KEY_VAR: &str = "CITADEL_SANDBOX_KEY";
pub const DEV_KEY_VAR: &str = "CITADEL_DEV_KEY";
pub const PROD_KEY_VAR: &str = "CITADEL_PROD_KEY";
pub const TOKEN_TIMEOUT_VAR: &str = "CITADEL_TOKEN_TIMEOUT";

/// Default wait for the first bridge token.
pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the demo client.
///
/// # Example
///
/// ```ignore
/// use citadel_demo::config::AppConfig;
///
/// let config = AppConfig::default()
///     .with_env(Environment::Dev)
///     .with_client_id("my-client");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Token service host
    pub api_host: String,
    /// Active environment override
    pub env: Option<Environment>,
    /// Client id override, same for every environment
    pub client_id: Option<String>,
    pub sandbox_key: Option<String>,
    pub dev_key: Option<String>,
    pub prod_key: Option<String>,
    /// How long the binary waits for a token before giving up
    pub token_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            env: None,
            client_id: None,
            sandbox_key: None,
            dev_key: None,
            prod_key: None,
            token_timeout: DEFAULT_TOKEN_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the access key for one environment.
    pub fn with_access_key(mut self, env: Environment, key: impl Into<String>) -> Self {
        *self.key_slot(env) = Some(key.into());
        self
    }

    pub fn with_token_timeout(mut self, timeout: Duration) -> Self {
        self.token_timeout = timeout;
        self
    }

    pub fn access_key(&self, env: Environment) -> Option<&str> {
        match env {
            Environment::Sandbox => self.sandbox_key.as_deref(),
            Environment::Dev => self.dev_key.as_deref(),
            Environment::Prod => self.prod_key.as_deref(),
        }
    }

    fn key_slot(&mut self, env: Environment) -> &mut Option<String> {
        match env {
            Environment::Sandbox => &mut self.sandbox_key,
            Environment::Dev => &mut self.dev_key,
            Environment::Prod => &mut self.prod_key,
        }
    }

    /// Create config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = get(API_HOST_VAR) {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                return Err(ConfigError::InvalidApiHost {
                    var: API_HOST_VAR,
                    value: host,
                });
            }
            config = config.with_api_host(host);
        }

        if let Some(env) = get(ENV_VAR) {
            let env = env
                .parse()
                .map_err(|source| ConfigError::InvalidEnvironment { var: ENV_VAR, source })?;
            config = config.with_env(env);
        }

        if let Some(client_id) = get(CLIENT_ID_VAR) {
            config = config.with_client_id(client_id);
        }

        for (env, var) in [
            (Environment::Sandbox, SANDBOX_KEY_VAR),
            (Environment::Dev, DEV_KEY_VAR),
            (Environment::Prod, PROD_KEY_VAR),
        ] {
            if let Some(key) = get(var) {
                config = config.with_access_key(env, key);
            }
        }

        if let Some(secs) = get(TOKEN_TIMEOUT_VAR) {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidTimeout {
                var: TOKEN_TIMEOUT_VAR,
                value: secs.clone(),
            })?;
            config = config.with_token_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Whether any value here would override a stored setting.
    pub fn overrides_settings(&self) -> bool {
        self.env.is_some()
            || self.client_id.is_some()
            || Environment::ALL.iter().any(|env| self.access_key(*env).is_some())
    }

    /// Write the configured overrides into `store`.
    pub fn seed_store(&self, store: &SettingsStore) {
        if let Some(env) = self.env {
            store.set_env(env);
        }
        for env in Environment::ALL {
            if let Some(client_id) = &self.client_id {
                store.set_client_id(env, client_id.clone());
            }
            if let Some(key) = self.access_key(env) {
                store.set_access_key(env, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_host, "https://prod.citadelid.com");
        assert_eq!(config.token_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            ("CITADEL_API_HOST", "http://localhost:9000"),
            ("CITADEL_ENV", "dev"),
            ("CITADEL_CLIENT_ID", "client"),
            ("CITADEL_DEV_KEY", "dev-secret"),
            ("CITADEL_TOKEN_TIMEOUT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_host, "http://localhost:9000");
        assert_eq!(config.env, Some(Environment::Dev));
        assert_eq!(config.client_id.as_deref(), Some("client"));
        assert_eq!(config.access_key(Environment::Dev), Some("dev-secret"));
        assert_eq!(config.access_key(Environment::Sandbox), None);
        assert_eq!(config.token_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("CITADEL_ENV", "  "), ("CITADEL_PROD_KEY", "")]))
            .unwrap();
        assert_eq!(config.env, None);
        assert_eq!(config.prod_key, None);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("CITADEL_ENV", "staging")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment { var: "CITADEL_ENV", .. }));

        let err = AppConfig::from_lookup(lookup(&[("CITADEL_API_HOST", "prod.citadelid.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiHost { .. }));

        let err = AppConfig::from_lookup(lookup(&[("CITADEL_TOKEN_TIMEOUT", "soon")])).unwrap_err();
        assert_eq!(err.to_string(), "CITADEL_TOKEN_TIMEOUT: expected a number of seconds, got 'soon'");
    }

    #[test]
    fn test_seed_store_overrides_only_present_values() {
        let store = SettingsStore::new();
        store.set_access_key(Environment::Sandbox, "from-file");
        store.set_client_id(Environment::Prod, "file-client");

        AppConfig::new()
            .with_env(Environment::Prod)
            .with_access_key(Environment::Prod, "prod-secret")
            .seed_store(&store);

        assert_eq!(store.env(), Environment::Prod);
        assert_eq!(store.credentials(Environment::Sandbox).access_key, "from-file");
        assert_eq!(store.active_credentials().client_id, "file-client");
        assert_eq!(store.active_credentials().access_key, "prod-secret");
    }

    #[test]
    fn test_overrides_settings() {
        assert!(!AppConfig::new().overrides_settings());
        assert!(!AppConfig::new()
            .with_api_host("http://localhost:9000")
            .with_token_timeout(Duration::from_secs(1))
            .overrides_settings());
        assert!(AppConfig::new().with_env(Environment::Dev).overrides_settings());
        assert!(AppConfig::new().with_client_id("c").overrides_settings());
        assert!(AppConfig::new()
            .with_access_key(Environment::Prod, "k")
            .overrides_settings());
    }

    #[test]
    fn test_client_id_applies_to_every_environment() {
        let store = SettingsStore::new();
        AppConfig::new().with_client_id("shared").seed_store(&store);
        for env in Environment::ALL {
            assert_eq!(store.credentials(env).client_id, "shared");
        }
    }
}
