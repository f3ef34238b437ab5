//! SQLite adapter implementation

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row, TypeInfo, ValueRef};
use std::path::Path;
use tracing::debug;

use crate::adapter::{ConnectionFactory, ReadOnlyConnection, Record};
use crate::error::{CoreError, Result};
use crate::query::ReadQuery;

/// Opens SQLite files with `SQLITE_OPEN_READONLY`
#[derive(Debug, Clone, Default)]
pub struct SqliteConnectionFactory;

impl SqliteConnectionFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectionFactory for SqliteConnectionFactory {
    async fn open_read_only(&self, path: &Path) -> Result<Box<dyn ReadOnlyConnection>> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false)
            .connect()
            .await
            .map_err(|e| {
                CoreError::QueryFailed(format!("failed to open {}: {}", path.display(), e))
            })?;

        debug!(path = %path.display(), "Opened read-only SQLite connection");
        Ok(Box::new(SqliteReadOnlyConnection { conn: Some(conn) }))
    }
}

/// A read-only SQLite handle; `None` once closed
pub struct SqliteReadOnlyConnection {
    conn: Option<SqliteConnection>,
}

#[async_trait]
impl ReadOnlyConnection for SqliteReadOnlyConnection {
    async fn fetch_all(&mut self, query: &ReadQuery) -> Result<Vec<Record>> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| CoreError::QueryFailed("connection already closed".to_string()))?;

        let mut statement = sqlx::query(query.sql());
        if let Some(limit) = query.limit() {
            statement = statement.bind(limit);
        }

        let rows = statement.fetch_all(&mut *conn).await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await?;
        }
        Ok(())
    }
}

/// Convert a row by the runtime storage class of each value
fn row_to_record(row: &SqliteRow) -> Result<Record> {
    let mut record = Record::new();

    for column in row.columns() {
        let ordinal = column.ordinal();
        let raw = row.try_get_raw(ordinal)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(ordinal)?),
                "REAL" => serde_json::Number::from_f64(row.try_get::<f64, _>(ordinal)?)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(ordinal)?),
                _ => Value::String(row.try_get::<String, _>(ordinal)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}
