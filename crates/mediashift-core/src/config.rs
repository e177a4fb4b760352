//! Configuration module
//!
//! Immutable configuration for a migration run: object storage connection,
//! database connection and the folder to scan. Built once at startup and
//! passed explicitly to the storage factory, the repository and the migrator.

use std::fmt;
use std::path::PathBuf;

use crate::error::AppError;

const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REGION: &str = "us-east-1";

/// Object storage connection settings (S3-compatible, e.g. MinIO).
#[derive(Clone)]
pub struct StorageConfig {
    /// Host and optional port, without scheme (e.g. `minio.internal:9000`).
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// Use HTTPS for the storage transport. Public URLs are always `https://`.
    pub secure: bool,
    pub region: String,
}

impl StorageConfig {
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            bucket: bucket.into(),
            secure: false,
            region: DEFAULT_REGION.to_string(),
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Endpoint URL used by the storage client for requests.
    pub fn endpoint_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.endpoint.trim_end_matches('/'))
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("secure", &self.secure)
            .field("region", &self.region)
            .finish()
    }
}

/// Postgres connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            max_connections: 1,
            acquire_timeout_secs: CONNECTION_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    // Connection strings usually embed the password.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("connection_string", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Everything a single migration run needs.
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    pub root: PathBuf,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    /// Maximum number of files processed at once. 1 keeps traversal order.
    pub concurrency: usize,
}

impl MigrationConfig {
    pub fn new(root: impl Into<PathBuf>, storage: StorageConfig, database: DatabaseConfig) -> Self {
        Self {
            root: root.into(),
            storage,
            database,
            concurrency: 1,
        }
    }

    /// Set the worker count; the database pool is sized to match.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self.database.max_connections = u32::try_from(concurrency.max(1)).unwrap_or(u32::MAX);
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.root.as_os_str().is_empty() {
            return Err(AppError::Config("folder path is required".to_string()));
        }
        if self.storage.endpoint.trim().is_empty() {
            return Err(AppError::Config("storage endpoint is empty".to_string()));
        }
        if self.storage.bucket.trim().is_empty() {
            return Err(AppError::Config("storage bucket is empty".to_string()));
        }
        if self.database.connection_string.trim().is_empty() {
            return Err(AppError::Config(
                "database connection string is empty".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(AppError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
