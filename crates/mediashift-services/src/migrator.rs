//! Folder-to-bucket migration.
//!
//! Every non-directory entry under the root is looked up in the database by its
//! base name. Matching records with a non-empty `url` get the file uploaded under
//! its relative path, their `formats` URLs rewritten to the bucket, and both
//! columns written back. Every per-file failure is logged and the walk moves on.

use futures::stream::{self, StreamExt};
use mediashift_core::{object_key, AppError, FileFormats, PublicUrlBuilder};
use mediashift_db::FileRecordStore;
use mediashift_storage::Storage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::report::MigrationReport;

/// A file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub object_key: String,
    /// Base name; the database lookup key. Equal base names in different
    /// folders map to the same record.
    pub filename: String,
}

impl LocalFile {
    pub fn new(root: &Path, path: PathBuf) -> Option<Self> {
        let object_key = object_key(root, &path)?;
        let filename = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            path,
            object_key,
            filename,
        })
    }
}

/// What happened to one walk entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Migrated { formats_parse_error: bool },
    /// No record, or the record's `url` is empty.
    NotInDatabase,
    LookupFailed,
    UploadFailed,
    SerializeFailed { formats_parse_error: bool },
    UpdateFailed { formats_parse_error: bool },
    WalkError,
}

pub struct Migrator {
    storage: Arc<dyn Storage>,
    records: Arc<dyn FileRecordStore>,
    urls: PublicUrlBuilder,
    concurrency: usize,
}

impl Migrator {
    pub fn new(
        storage: Arc<dyn Storage>,
        records: Arc<dyn FileRecordStore>,
        urls: PublicUrlBuilder,
    ) -> Self {
        Self {
            storage,
            records,
            urls,
            concurrency: 1,
        }
    }

    /// Process up to `concurrency` files at once. With 1, files are handled
    /// strictly in walk order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Walk `root` and migrate every file found.
    ///
    /// Fails only when the walk cannot start: `root` is missing, unreadable or not
    /// a directory. Everything after that is counted in the report.
    pub async fn run(&self, root: &Path) -> Result<MigrationReport, AppError> {
        let metadata = tokio::fs::metadata(root).await.map_err(|e| {
            AppError::InvalidInput(format!("cannot scan {}: {}", root.display(), e))
        })?;
        if !metadata.is_dir() {
            return Err(AppError::InvalidInput(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        tracing::info!(
            root = %root.display(),
            bucket = %self.storage.bucket(),
            concurrency = self.concurrency,
            "Starting migration"
        );

        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => None,
                Ok(entry) => LocalFile::new(root, entry.into_path()).map(Ok),
                Err(e) => Some(Err(e)),
            });

        let mut outcomes = stream::iter(entries)
            .map(|entry| async move {
                match entry {
                    Ok(file) => self.migrate_file(&file).await,
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            path = ?e.path(),
                            "Error accessing entry"
                        );
                        FileOutcome::WalkError
                    }
                }
            })
            .buffer_unordered(self.concurrency);

        let mut report = MigrationReport::default();
        while let Some(outcome) = outcomes.next().await {
            report.record(&outcome);
        }
        Ok(report)
    }

    /// Look up, upload and repoint a single file.
    pub async fn migrate_file(&self, file: &LocalFile) -> FileOutcome {
        let record = match self.records.find_by_name(&file.filename).await {
            Ok(Some(record)) if record.has_url() => record,
            Ok(_) => {
                tracing::info!(filename = %file.filename, "File does not exist in the database");
                return FileOutcome::NotInDatabase;
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filename = %file.filename,
                    "Error checking file existence in the database"
                );
                return FileOutcome::LookupFailed;
            }
        };

        match self.storage.upload_file(&file.object_key, &file.path).await {
            Ok(url) => tracing::info!(
                path = %file.path.display(),
                bucket = %self.storage.bucket(),
                url = %url,
                "Uploaded file"
            ),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %file.path.display(),
                    key = %file.object_key,
                    "Error uploading file"
                );
                return FileOutcome::UploadFailed;
            }
        }

        let (mut formats, formats_parse_error) = match record.formats.as_deref() {
            Some(raw) => {
                let (formats, parse_error) = FileFormats::parse_lenient(raw);
                if let Some(e) = &parse_error {
                    tracing::warn!(
                        error = %e,
                        filename = %file.filename,
                        "Error parsing existing formats JSON, continuing with defaults"
                    );
                }
                (formats, parse_error.is_some())
            }
            None => {
                tracing::warn!(
                    filename = %file.filename,
                    "Formats column is NULL, continuing with defaults"
                );
                (FileFormats::default(), true)
            }
        };

        formats.rewrite_urls(&self.urls, &file.object_key);

        let formats_json = match formats.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filename = %file.filename,
                    "Error converting updated formats to JSON"
                );
                return FileOutcome::SerializeFailed {
                    formats_parse_error,
                };
            }
        };

        match self
            .records
            .update_urls(&file.filename, &formats.url, &formats_json)
            .await
        {
            Ok(rows) => {
                tracing::info!(
                    filename = %file.filename,
                    url = %formats.url,
                    rows,
                    "Updated URL and formats in the database"
                );
                FileOutcome::Migrated {
                    formats_parse_error,
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filename = %file.filename,
                    "Error updating the URL and formats in the database"
                );
                FileOutcome::UpdateFailed {
                    formats_parse_error,
                }
            }
        }
    }
}
