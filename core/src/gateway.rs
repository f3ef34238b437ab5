//! Read-only query gateway
//!
//! Runs one predefined query against one database file per call:
//! existence check, open, fetch, close. The connection is never held
//! beyond a single call, and it is closed on every exit path once opened.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::adapter::{ConnectionFactory, Record};
use crate::error::{CoreError, Result};
use crate::guard::ensure_database_exists;
use crate::query::ReadQuery;

/// Default per-stage timeout
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared entry point used by every endpoint
#[derive(Clone)]
pub struct QueryGateway {
    factory: Arc<dyn ConnectionFactory>,
    timeout: Option<Duration>,
}

impl QueryGateway {
    /// Create a gateway over `factory`; `timeout` bounds the open and the fetch separately
    pub fn new(factory: Arc<dyn ConnectionFactory>, timeout: Option<Duration>) -> Self {
        Self { factory, timeout }
    }

    /// Run `query` against the database at `path` and return every row
    pub async fn fetch(&self, path: &Path, query: &ReadQuery) -> Result<Vec<Record>> {
        ensure_database_exists(path).await?;

        let mut conn = self
            .bounded("open", self.factory.open_read_only(path))
            .await
            .map_err(|e| log_failure(path, query, e))?;

        let result = self.bounded("fetch", conn.fetch_all(query)).await;

        // An abandoned fetch keeps the driver busy, so close is bounded too.
        // Dropping the handle afterwards releases it in the background.
        if let Err(e) = self.bounded("close", conn.close()).await {
            warn!(
                path = %path.display(),
                query = query.name(),
                "Failed to close connection: {}",
                e
            );
        }
        drop(conn);

        let rows = result.map_err(|e| log_failure(path, query, e))?;
        debug!(query = query.name(), rows = rows.len(), "Query complete");
        Ok(rows)
    }

    async fn bounded<T, F>(&self, stage: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                CoreError::QueryFailed(format!("{} timed out after {:?}", stage, limit))
            })?,
            None => fut.await,
        }
    }
}

fn log_failure(path: &Path, query: &ReadQuery, err: CoreError) -> CoreError {
    error!(
        path = %path.display(),
        query = query.name(),
        "Query failed: {}",
        err.diagnostic()
    );
    err
}
