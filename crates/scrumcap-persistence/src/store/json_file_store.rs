use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot, FORMAT_VERSION};
use scrumcap_core::{CapacityError, CapacityResult};
use scrumcap_domain::Snapshot;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// JSON file-based persistence store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
}

/// On-disk wrapper around the data snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: serde_json::Value,
}

impl JsonEnvelope {
    pub fn to_json_string(&self) -> CapacityResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CapacityError::Serialization(e.to_string()))
    }
}

fn serialization_error(e: serde_json::Error) -> CapacityError {
    CapacityError::Serialization(e.to_string())
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    /// Load the domain snapshot, or an empty one if the file does not exist.
    pub async fn load_snapshot(&self) -> CapacityResult<Snapshot> {
        if !self.exists().await {
            return Ok(Snapshot::new());
        }
        let (snapshot, _metadata) = self.load().await?;
        serde_json::from_slice(&snapshot.data).map_err(serialization_error)
    }

    pub async fn save_snapshot(&self, snapshot: &Snapshot) -> CapacityResult<PersistenceMetadata> {
        let data = serde_json::to_vec(snapshot).map_err(serialization_error)?;
        self.save(StoreSnapshot {
            data,
            metadata: PersistenceMetadata::new(self.instance_id),
        })
        .await
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn save(&self, mut snapshot: StoreSnapshot) -> CapacityResult<PersistenceMetadata> {
        snapshot.metadata.instance_id = self.instance_id;
        snapshot.metadata.saved_at = chrono::Utc::now();

        let data_value: serde_json::Value =
            serde_json::from_slice(&snapshot.data).map_err(serialization_error)?;
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: snapshot.metadata.clone(),
            data: data_value,
        };
        let json = envelope.to_json_string()?;

        AtomicWriter::write_atomic(&self.path, json.as_bytes()).await?;

        tracing::info!(
            "Saved {} bytes to {}",
            json.len(),
            self.path.display()
        );

        Ok(snapshot.metadata)
    }

    async fn load(&self) -> CapacityResult<(StoreSnapshot, PersistenceMetadata)> {
        let file_bytes = AtomicWriter::read_all(&self.path).await?;
        let value: serde_json::Value =
            serde_json::from_slice(&file_bytes).map_err(serialization_error)?;

        // Files written before the envelope existed hold the bare snapshot
        let envelope = if value.get("version").is_some() {
            serde_json::from_value::<JsonEnvelope>(value).map_err(serialization_error)?
        } else {
            tracing::info!(
                "No envelope in {}, reading it as a bare snapshot",
                self.path.display()
            );
            JsonEnvelope {
                version: FORMAT_VERSION,
                metadata: PersistenceMetadata::new(self.instance_id),
                data: value,
            }
        };

        if envelope.version != FORMAT_VERSION {
            return Err(CapacityError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }

        let data = serde_json::to_vec(&envelope.data).map_err(serialization_error)?;
        let snapshot = StoreSnapshot {
            data,
            metadata: envelope.metadata.clone(),
        };

        tracing::info!(
            "Loaded {} bytes from {}",
            file_bytes.len(),
            self.path.display()
        );

        Ok((snapshot, envelope.metadata))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
