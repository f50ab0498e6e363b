//! Credentials and per-product settings edited by the user.

use serde::{Deserialize, Serialize};

use super::Environment;

/// API credentials for one environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    /// Value sent as `X-Access-Client-Id`.
    pub client_id: String,
    /// Value sent as `X-Access-Secret`.
    pub access_key: String,
}

impl Credentials {
    /// Create credentials from a client id and access key.
    pub fn new(client_id: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_key: access_key.into(),
        }
    }

    /// Both the client id and the access key are set.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.access_key.is_empty()
    }
}

/// Credentials kept side by side for every environment.
///
/// Switching environments never drops the other environments' keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvCredentials {
    #[serde(default)]
    pub sandbox: Credentials,
    #[serde(default)]
    pub dev: Credentials,
    #[serde(default)]
    pub prod: Credentials,
}

impl EnvCredentials {
    pub fn get(&self, env: Environment) -> &Credentials {
        match env {
            Environment::Sandbox => &self.sandbox,
            Environment::Dev => &self.dev,
            Environment::Prod => &self.prod,
        }
    }

    pub fn get_mut(&mut self, env: Environment) -> &mut Credentials {
        match env {
            Environment::Sandbox => &mut self.sandbox,
            Environment::Dev => &mut self.dev,
            Environment::Prod => &mut self.prod,
        }
    }
}

/// Default routing number pre-filled for deposit flows.
pub const DEFAULT_ROUTING_NUMBER: &str = "123456789";
/// Default account number pre-filled for deposit flows.
pub const DEFAULT_ACCOUNT_NUMBER: &str = "160025987";
/// Default bank name pre-filled for deposit flows.
pub const DEFAULT_BANK_NAME: &str = "TD Bank";
/// Default account type pre-filled for deposit flows.
pub const DEFAULT_ACCOUNT_TYPE: &str = "checking";

/// Optional parameters attached to a bridge token request.
///
/// The bank account fields only matter for
/// [`ProductType::requires_account`](super::ProductType::requires_account)
/// products but are kept for every product so switching back and forth does
/// not lose edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSettings {
    /// Company mapping id, skips the employer search step.
    pub mapping_id: String,
    /// Payroll provider id, skips provider selection.
    pub provider_id: String,
    /// Carried for completeness; never sent to the token service.
    /// Any JSON number, fractional amounts included.
    pub deposit_value: f64,
    pub routing_number: String,
    pub account_number: String,
    pub bank_name: String,
    pub account_type: String,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            mapping_id: String::new(),
            provider_id: String::new(),
            deposit_value: 1.0,
            routing_number: DEFAULT_ROUTING_NUMBER.to_string(),
            account_number: DEFAULT_ACCOUNT_NUMBER.to_string(),
            bank_name: DEFAULT_BANK_NAME.to_string(),
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
        }
    }
}

impl ProductSettings {
    /// Shallow merge: every field present in `patch` overrides ours,
    /// everything else is kept.
    pub fn merged(&self, patch: &ProductSettingsPatch) -> Self {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next
    }
}

/// A partial edit of [`ProductSettings`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSettingsPatch {
    pub mapping_id: Option<String>,
    pub provider_id: Option<String>,
    pub deposit_value: Option<f64>,
    pub routing_number: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub account_type: Option<String>,
}

impl ProductSettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mapping_id(mut self, value: impl Into<String>) -> Self {
        self.mapping_id = Some(value.into());
        self
    }

    pub fn provider_id(mut self, value: impl Into<String>) -> Self {
        self.provider_id = Some(value.into());
        self
    }

    pub fn deposit_value(mut self, value: f64) -> Self {
        self.deposit_value = Some(value);
        self
    }

    pub fn routing_number(mut self, value: impl Into<String>) -> Self {
        self.routing_number = Some(value.into());
        self
    }

    pub fn account_number(mut self, value: impl Into<String>) -> Self {
        self.account_number = Some(value.into());
        self
    }

    pub fn bank_name(mut self, value: impl Into<String>) -> Self {
        self.bank_name = Some(value.into());
        self
    }

    pub fn account_type(mut self, value: impl Into<String>) -> Self {
        self.account_type = Some(value.into());
        self
    }

    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every present field into `target`.
    pub fn apply_to(&self, target: &mut ProductSettings) {
        if let Some(ref v) = self.mapping_id {
            target.mapping_id = v.clone();
        }
        if let Some(ref v) = self.provider_id {
            target.provider_id = v.clone();
        }
        if let Some(v) = self.deposit_value {
            target.deposit_value = v;
        }
        if let Some(ref v) = self.routing_number {
            target.routing_number = v.clone();
        }
        if let Some(ref v) = self.account_number {
            target.account_number = v.clone();
        }
        if let Some(ref v) = self.bank_name {
            target.bank_name = v.clone();
        }
        if let Some(ref v) = self.account_type {
            target.account_type = v.clone();
        }
    }
}
