use crate::keys::validate_storage_key;
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use mediashift_core::{PublicUrlBuilder, StorageConfig};
use object_store::aws::AmazonS3Builder;
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

const OCTET_STREAM: &str = "application/octet-stream";

/// Bytes buffered per file before the upload switches to multipart.
/// S3 rejects multipart parts below 5 MiB.
const DEFAULT_PART_SIZE: usize = 8 * 1024 * 1024;

/// S3-compatible storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    urls: PublicUrlBuilder,
    part_size: usize,
}

impl S3Storage {
    /// Create a client for an S3-compatible endpoint (MinIO, AWS, ...).
    ///
    /// Requests use path-style addressing against `config.endpoint_url()`; plain
    /// HTTP is allowed unless `config.secure` is set. No request is made here.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let store = AmazonS3Builder::new()
            .with_endpoint(config.endpoint_url())
            .with_allow_http(!config.secure)
            .with_virtual_hosted_style_request(false)
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone())
            .with_access_key_id(config.access_key.clone())
            .with_secret_access_key(config.secret_key.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::debug!(
            endpoint = %config.endpoint_url(),
            bucket = %config.bucket,
            region = %config.region,
            "S3 client configured"
        );

        Ok(Self::from_store(
            Arc::new(store),
            &config.endpoint,
            &config.bucket,
        ))
    }

    /// Wrap an existing object store, e.g. `object_store::memory::InMemory`.
    pub fn from_store(store: Arc<dyn ObjectStore>, endpoint: &str, bucket: &str) -> Self {
        S3Storage {
            store,
            bucket: bucket.to_string(),
            urls: PublicUrlBuilder::new(endpoint, bucket),
            part_size: DEFAULT_PART_SIZE,
        }
    }

    /// Files larger than `part_size` are streamed as a multipart upload in parts of
    /// this size. Smaller files go up in a single PUT.
    pub fn with_part_size(mut self, part_size: usize) -> Self {
        self.part_size = part_size.max(1);
        self
    }
}

/// Keys are used verbatim so the stored object matches the public URL.
fn object_location(storage_key: &str) -> StorageResult<ObjectPath> {
    validate_storage_key(storage_key)?;
    ObjectPath::parse(storage_key).map_err(|e| StorageError::InvalidKey(e.to_string()))
}

fn content_type_attributes(content_type: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::ContentType,
        AttributeValue::from(content_type.to_string()),
    );
    attributes
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload_file(&self, storage_key: &str, path: &Path) -> StorageResult<String> {
        let location = object_location(storage_key)?;
        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(OCTET_STREAM);
        let start = std::time::Instant::now();

        let mut writer = BufWriter::with_capacity(self.store.clone(), location, self.part_size)
            .with_attributes(content_type_attributes(content_type));

        let result = match tokio::io::copy(&mut file, &mut writer).await {
            Ok(size) => writer.shutdown().await.map(|_| size),
            Err(e) => Err(e),
        };

        let size = match result {
            Ok(size) => size,
            Err(e) => {
                if let Err(abort_error) = writer.abort().await {
                    tracing::warn!(
                        error = %abort_error,
                        key = %storage_key,
                        "Failed to abort multipart upload"
                    );
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    path = %path.display(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                return Err(StorageError::UploadFailed(e.to_string()));
            }
        };

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            multipart = size > self.part_size as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String> {
        let location = object_location(storage_key)?;

        let size = data.len() as u64;
        let options = PutOptions {
            attributes: content_type_attributes(content_type),
            ..Default::default()
        };
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %storage_key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = object_location(storage_key)?;
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.urls.normalize(storage_key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
