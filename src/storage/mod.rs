//! Storage abstractions for the availability snapshot.
//!
//! The snapshot is a flat JSON array of the latest results, rewritten
//! wholesale at the end of every availability cycle:
//!
//! ```text
//! storage/
//! ├── settings.toml         # Optional settings
//! ├── config.json           # Tracked venues
//! └── store.json            # Snapshot: latest result per tracked product
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{AvailabilityResult, Snapshot};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a snapshot write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of results written
    pub result_count: usize,
    /// Where the snapshot was written
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the persisted result list in stored order.
    ///
    /// A snapshot that was never written loads as an empty list.
    async fn load_results(&self) -> Result<Vec<AvailabilityResult>>;

    /// Replace the persisted result list.
    async fn write_results(&self, results: &[AvailabilityResult]) -> Result<WriteMetadata>;

    /// Load the persisted results as a name-keyed lookup.
    async fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::from_results(self.load_results().await?))
    }
}
