//! Storage key validation shared by backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that are empty, absolute, or escape the bucket prefix.
pub fn validate_storage_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("empty storage key".to_string()));
    }
    if storage_key.starts_with('/') || storage_key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(storage_key.to_string()));
    }
    Ok(())
}
