//! Mediashift services
//!
//! The migration pipeline: walk a folder, upload matching files to object storage
//! and repoint their database records at the bucket.

pub mod migrator;
pub mod report;

pub use migrator::{FileOutcome, LocalFile, Migrator};
pub use report::MigrationReport;
