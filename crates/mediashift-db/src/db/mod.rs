//! Database repositories for data access layer
//
// File records (lookup by name, URL rewrite)
pub mod files;

pub use files::{FileRecordStore, FileRepository};
