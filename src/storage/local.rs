//! Local filesystem snapshot storage.
//!
//! Writes go to a sibling temp file that is then renamed over the snapshot,
//! so a reader running concurrently with a write sees either the previous or
//! the new snapshot, never a truncated one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::AvailabilityResult;
use crate::storage::{SnapshotStore, WriteMetadata};

/// Snapshot stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a store backed by the given snapshot file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl SnapshotStore for LocalStorage {
    async fn load_results(&self) -> Result<Vec<AvailabilityResult>> {
        match self.read_bytes().await? {
            Some(bytes) => {
                // An earlier writer stored `null` for an empty list.
                let results: Option<Vec<AvailabilityResult>> = serde_json::from_slice(&bytes)?;
                Ok(results.unwrap_or_default())
            }
            None => {
                log::debug!("No snapshot found at {}", self.path.display());
                Ok(Vec::new())
            }
        }
    }

    async fn write_results(&self, results: &[AvailabilityResult]) -> Result<WriteMetadata> {
        let bytes = serde_json::to_vec_pretty(results)?;
        self.write_bytes(&bytes).await?;

        log::info!(
            "Snapshot: {} results written to {}",
            results.len(),
            self.path.display()
        );

        Ok(WriteMetadata {
            result_count: results.len(),
            location: self.path.display().to_string(),
            timestamp: Utc::now(),
        })
    }
}
