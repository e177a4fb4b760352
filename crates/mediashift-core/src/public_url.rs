//! Public URL and object key rules.
//!
//! Uploaded objects are addressed as `https://{endpoint}/{bucket}/{key}`. Values that
//! are already absolute (`http://` or `https://`) pass through untouched.

use std::path::{Component, Path};

/// Builds public bucket URLs for one endpoint/bucket pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrlBuilder {
    endpoint: String,
    bucket: String,
}

impl PublicUrlBuilder {
    pub fn new(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
        }
    }

    /// Normalize a stored path into a public URL.
    ///
    /// Absolute URLs are returned as-is. Otherwise backslashes become `/`, a single
    /// leading `/` is removed and the path is appended to the bucket root.
    pub fn normalize(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        let path = path.replace('\\', "/");
        let path = path.strip_prefix('/').unwrap_or(&path);
        format!("https://{}/{}/{}", self.endpoint, self.bucket, path)
    }
}

pub fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Object key for `path` relative to `root`: `/`-separated, no leading `/`.
///
/// Returns `None` when `path` is not under `root` or is `root` itself.
pub fn object_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
