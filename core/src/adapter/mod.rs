//! Read-only database connection abstraction
//!
//! Handlers never talk to a driver directly. They go through a
//! [`ConnectionFactory`] chosen at start-up, which hands out one
//! [`ReadOnlyConnection`] per request.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::query::ReadQuery;

pub mod sqlite;

pub use sqlite::SqliteConnectionFactory;

/// One result row, column name to JSON value, in column order
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Opens read-only connections to a database file
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Open `path` in a mode that rejects writes at the driver level
    async fn open_read_only(&self, path: &Path) -> Result<Box<dyn ReadOnlyConnection>>;
}

/// A single read-only database handle
#[async_trait]
pub trait ReadOnlyConnection: Send {
    /// Run `query` and collect every row eagerly
    async fn fetch_all(&mut self, query: &ReadQuery) -> Result<Vec<Record>>;

    /// Release the handle. Calling it twice is a no-op.
    async fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod mocks {
    use super::*;
    use mockall::mock;

    mock! {
        pub Factory {}

        #[async_trait]
        impl ConnectionFactory for Factory {
            async fn open_read_only(&self, path: &Path) -> Result<Box<dyn ReadOnlyConnection>>;
        }
    }

    mock! {
        pub Connection {}

        #[async_trait]
        impl ReadOnlyConnection for Connection {
            async fn fetch_all(&mut self, query: &ReadQuery) -> Result<Vec<Record>>;
            async fn close(&mut self) -> Result<()>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::*;
    use super::*;

    #[tokio::test]
    async fn test_mock_connection() {
        let mut conn = MockConnection::new();
        conn.expect_fetch_all()
            .with(mockall::predicate::eq(ReadQuery::analytics_summary()))
            .returning(|_| Ok(vec![Record::new()]));

        let rows = conn
            .fetch_all(&ReadQuery::analytics_summary())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
