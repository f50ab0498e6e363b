//! File-based settings provider.
//!
//! Settings are stored as pretty-printed JSON in
//! `~/.citadel-demo/settings.json`. The bridge token and widget flag are
//! never written.

use async_trait::async_trait;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::state::SettingsSnapshot;
use crate::traits::{SettingsError, SettingsProvider};

/// The settings directory name.
const SETTINGS_DIR: &str = ".citadel-demo";

/// The settings file name.
const SETTINGS_FILE: &str = "settings.json";

/// File-based settings provider.
#[derive(Debug, Clone)]
pub struct FileSettingsProvider {
    path: PathBuf,
}

impl FileSettingsProvider {
    /// Provider for `~/.citadel-demo/settings.json`.
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SettingsError> {
        let home = dirs::home_dir()
            .ok_or_else(|| SettingsError::Other("Failed to determine home directory".to_string()))?;
        Ok(Self {
            path: home.join(SETTINGS_DIR).join(SETTINGS_FILE),
        })
    }

    /// Provider for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<SettingsSnapshot>, SettingsError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SettingsError::LoadFailed(e.to_string())),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map(Some)
            .map_err(|e| SettingsError::Serialization(e.to_string()))
    }

    fn write(&self, snapshot: &SettingsSnapshot) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::SaveFailed(e.to_string()))?;
        }

        let file = File::create(&self.path).map_err(|e| SettingsError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| SettingsError::SaveFailed(e.to_string()))
    }
}

#[async_trait]
impl SettingsProvider for FileSettingsProvider {
    async fn load(&self) -> Result<Option<SettingsSnapshot>, SettingsError> {
        self.read()
    }

    async fn save(&self, snapshot: &SettingsSnapshot) -> Result<(), SettingsError> {
        self.write(snapshot)
    }
}
