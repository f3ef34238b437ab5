//! Existence check performed before a database is opened

use std::path::Path;
use tracing::error;

use crate::error::{CoreError, Result};

/// Fail with `NotFound` unless `path` is an existing regular file.
///
/// The check races with the later open; the databases are mounted
/// infrastructure and this only exists to give a clearer error.
pub async fn ensure_database_exists(path: &Path) -> Result<()> {
    if is_file(path).await {
        return Ok(());
    }

    let parent_exists = match path.parent() {
        Some(parent) => tokio::fs::metadata(parent)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false),
        None => false,
    };
    error!(
        path = %path.display(),
        parent_exists,
        "Database file not found"
    );
    Err(CoreError::NotFound {
        path: path.to_path_buf(),
        parent_exists,
    })
}

/// Whether `path` is an existing regular file
pub async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
