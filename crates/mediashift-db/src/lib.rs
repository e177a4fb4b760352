//! Mediashift database layer
//!
//! Repositories over the `public.files` table that the migrator reads and rewrites.

pub mod db;

pub use db::{FileRecordStore, FileRepository};
