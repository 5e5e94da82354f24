use scrumcap_core::CapacityResult;
use std::path::Path;
use tokio::fs;

/// Writes whole files through a temporary sibling and a rename, so readers
/// never observe a half-written snapshot.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> CapacityResult<()> {
        // Temp file must live on the same filesystem for the rename to be atomic
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).await?;

        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;
        // Already moved into place; stop the guard from deleting it
        temp_path.keep().map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub async fn read_all(path: &Path) -> CapacityResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
