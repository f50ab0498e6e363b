//! In-memory settings provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::state::SettingsSnapshot;
use crate::traits::{SettingsError, SettingsProvider};

/// Settings provider that keeps the snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    snapshot: Arc<Mutex<Option<SettingsSnapshot>>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that already holds `snapshot`.
    pub fn with_snapshot(snapshot: SettingsSnapshot) -> Self {
        let provider = Self::default();
        *provider.snapshot.lock().unwrap() = Some(snapshot);
        provider
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// The currently stored snapshot.
    pub fn stored(&self) -> Option<SettingsSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsProvider for InMemorySettings {
    async fn load(&self) -> Result<Option<SettingsSnapshot>, SettingsError> {
        Ok(self.stored())
    }

    async fn save(&self, snapshot: &SettingsSnapshot) -> Result<(), SettingsError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(SettingsError::SaveFailed("Mock save failure".to_string()));
        }
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }
}
