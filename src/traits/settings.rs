//! Settings persistence trait abstraction.
//!
//! Where settings live is up to the host. The store only needs something
//! that can hand back the last saved snapshot and accept a new one.

use async_trait::async_trait;

use crate::state::SettingsSnapshot;

/// Settings persistence errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    /// Failed to read stored settings
    #[error("Failed to load settings: {0}")]
    LoadFailed(String),
    /// Failed to write settings
    #[error("Failed to save settings: {0}")]
    SaveFailed(String),
    /// Stored settings could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Other error
    #[error("Settings error: {0}")]
    Other(String),
}

/// Trait for loading and saving settings.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Load the last saved settings.
    ///
    /// # Returns
    /// - `Ok(Some(snapshot))` if settings were stored
    /// - `Ok(None)` if nothing has been saved yet
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<SettingsSnapshot>, SettingsError>;

    /// Save a snapshot, replacing whatever was stored.
    async fn save(&self, snapshot: &SettingsSnapshot) -> Result<(), SettingsError>;
}
