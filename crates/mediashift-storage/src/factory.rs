use crate::{S3Storage, Storage, StorageError, StorageResult};
use mediashift_core::StorageConfig;
use std::sync::Arc;

/// Create the storage backend for a migration run.
pub fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    if config.bucket.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "storage bucket not configured".to_string(),
        ));
    }
    if config.endpoint.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "storage endpoint not configured".to_string(),
        ));
    }

    let storage = S3Storage::new(config)?;
    Ok(Arc::new(storage))
}
