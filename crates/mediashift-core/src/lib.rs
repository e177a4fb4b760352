//! Mediashift Core Library
//!
//! This crate provides the domain model, error type, configuration and URL rules
//! shared by the storage, database and migration crates.

pub mod config;
pub mod error;
pub mod models;
pub mod public_url;

// Re-export commonly used types
pub use config::{DatabaseConfig, MigrationConfig, StorageConfig};
pub use error::AppError;
pub use models::{FileFormats, FileRecord, Format, FormatsParseError};
pub use public_url::{object_key, PublicUrlBuilder};
