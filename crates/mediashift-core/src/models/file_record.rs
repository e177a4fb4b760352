//! Row of `public.files` as seen by the migrator.

use serde::{Deserialize, Serialize};

/// The columns the migrator reads; `name` is the lookup key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileRecord {
    pub name: String,
    pub url: String,
    /// `None` when the column is NULL.
    pub formats: Option<String>,
}

impl FileRecord {
    /// Records without a URL are handled like missing ones.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}
