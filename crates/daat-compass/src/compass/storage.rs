use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::repository::{ResultStore, SavedResult, StoreError};

/// Single JSON file holding the most recent result.
///
/// Saves go to a sibling temp file that is renamed over the slot, so a reader sees either
/// the previous value or the new one.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "result".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ResultStore for FileResultStore {
    fn save(&self, result: &SavedResult) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec_pretty(result)
            .map_err(|error| StoreError::Unavailable(error.to_string()))?;
        let staging = self.staging_path();
        fs::write(&staging, body)?;
        fs::rename(&staging, &self.path)?;

        debug!(path = %self.path.display(), "saved result");
        Ok(())
    }

    fn load(&self) -> Result<Option<SavedResult>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|error| StoreError::Corrupt(error.to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn has_saved(&self) -> Result<bool, StoreError> {
        Ok(self.path.is_file())
    }
}
