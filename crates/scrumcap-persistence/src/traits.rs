use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scrumcap_core::CapacityResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current version of the on-disk envelope
pub const FORMAT_VERSION: u32 = 1;

/// Metadata for persistence operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Point-in-time snapshot of all data that needs to be persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Raw JSON bytes of the teams, resources and sprints
    pub data: Vec<u8>,
    pub metadata: PersistenceMetadata,
}

/// Trait for abstract storage operations
/// Implementations handle different backend storage (file, database, etc.)
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Save a snapshot to the store
    async fn save(&self, snapshot: StoreSnapshot) -> CapacityResult<PersistenceMetadata>;

    /// Load the current snapshot from the store
    async fn load(&self) -> CapacityResult<(StoreSnapshot, PersistenceMetadata)>;

    /// Check if the store file exists
    async fn exists(&self) -> bool;

    /// Get the path to the store file
    fn path(&self) -> &Path;
}
