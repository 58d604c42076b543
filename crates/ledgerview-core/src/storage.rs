//! Snapshot persistence

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::CoreError;
use super::models::LedgerSnapshot;

/// Store reference type
pub type StoreRef = Arc<dyn SnapshotStore>;

/// Durable storage for the last synced snapshot
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot, `None` when nothing has been stored yet
    async fn load(&self) -> Result<Option<LedgerSnapshot>, CoreError>;

    /// Replace the stored snapshot
    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), CoreError>;
}

/// Snapshot store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> CoreError {
        CoreError::StorageError {
            message: format!("{} {}: {}", action, self.path.display(), e),
        }
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<LedgerSnapshot>, CoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("Cannot read", e)),
        };

        let snapshot = serde_json::from_slice(&content)
            .map_err(|e| self.storage_error("Corrupt snapshot in", e))?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("Cannot create directory for", e))?;
        }

        let content = serde_json::to_vec(snapshot)
            .map_err(|e| self.storage_error("Cannot serialize snapshot for", e))?;

        // Write next to the target and rename so a crash never leaves half a snapshot
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &content)
            .await
            .map_err(|e| self.storage_error("Cannot write", e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.storage_error("Cannot replace", e))?;

        log::debug!("Saved {} entries to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}
