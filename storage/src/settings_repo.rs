//! Settings persistence: one JSON object.

use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::json_file::JsonFile;
use crate::models::Settings;

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    file: JsonFile<Settings>,
}

impl SettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Stored settings, or the defaults when none are stored.
    pub async fn load(&self) -> Settings {
        self.file.load().await
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        self.file.save(settings).await
    }
}
