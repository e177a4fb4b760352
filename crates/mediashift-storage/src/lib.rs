//! Mediashift Storage Library
//!
//! This crate provides the storage abstraction used by the migrator and its
//! S3-compatible implementation (AWS S3, MinIO, ...).
//!
//! # Storage key format
//!
//! Keys are the `/`-separated path of a file relative to the scanned folder, e.g.
//! `2023/05/photo.jpg`. Keys must not contain `..` segments or a leading `/`, and are
//! stored verbatim, without percent-encoding.
//! Objects are published as `https://{endpoint}/{bucket}/{key}`.

pub mod factory;
pub(crate) mod keys;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
