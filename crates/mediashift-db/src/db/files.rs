//! File record repository: lookup and URL rewrite for the `public.files` table.

use async_trait::async_trait;
use mediashift_core::{AppError, DatabaseConfig, FileRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool, Postgres};
use std::time::Duration;

const SELECT_FILE_BY_NAME: &str = r#"
    SELECT name, COALESCE(url, '') AS url, formats
    FROM public.files
    WHERE name = $1
    LIMIT 1
"#;

const UPDATE_FILE_URLS: &str = r#"
    UPDATE public.files
    SET url = $1, formats = $2
    WHERE name = $3
"#;

/// Read/update access to file records, keyed by file name.
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Fetch the record named `name`, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<FileRecord>, AppError>;

    /// Set `url` and `formats` on every record named `name`. Returns rows affected.
    async fn update_urls(&self, name: &str, url: &str, formats: &str) -> Result<u64, AppError>;
}

/// Postgres-backed repository for `public.files`.
#[derive(Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool and check that both statements prepare against the schema.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.connection_string)
            .await?;

        tracing::info!(
            max_connections = config.max_connections.max(1),
            "Database connected successfully"
        );

        let repository = Self::new(pool);
        repository.prepare_statements().await?;
        Ok(repository)
    }

    /// Prepare the lookup and update statements once; fails if the table or
    /// columns are missing.
    pub async fn prepare_statements(&self) -> Result<(), AppError> {
        self.pool.prepare(SELECT_FILE_BY_NAME).await?;
        self.pool.prepare(UPDATE_FILE_URLS).await?;
        tracing::debug!(db.table = "files", "Statements prepared");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FileRecordStore for FileRepository {
    #[tracing::instrument(skip(self), fields(db.table = "files"))]
    async fn find_by_name(&self, name: &str) -> Result<Option<FileRecord>, AppError> {
        let record = sqlx::query_as::<Postgres, FileRecord>(SELECT_FILE_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    #[tracing::instrument(skip(self, formats), fields(db.table = "files"))]
    async fn update_urls(&self, name: &str, url: &str, formats: &str) -> Result<u64, AppError> {
        let result = sqlx::query(UPDATE_FILE_URLS)
            .bind(url)
            .bind(formats)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
