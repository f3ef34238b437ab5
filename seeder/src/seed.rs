//! Schema creation and sample data

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection, Row};
use std::path::Path;
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EVENTS_SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS risk_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        event_type TEXT NOT NULL,
        timestamp DATETIME NOT NULL,
        risk_score REAL,
        risk_level TEXT,
        sensitive_data_access INTEGER DEFAULT 0,
        unusual_time INTEGER DEFAULT 0,
        large_data_transfer INTEGER DEFAULT 0,
        privileged_action INTEGER DEFAULT 0,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_user_id ON risk_events(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_timestamp ON risk_events(timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_risk_level ON risk_events(risk_level)",
];

const ANALYTICS_SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS analytics_summary (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date DATE NOT NULL,
        risk_level TEXT NOT NULL,
        event_count INTEGER DEFAULT 0,
        avg_risk_score REAL,
        max_risk_score REAL,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        UNIQUE(date, risk_level)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_analytics_date ON analytics_summary(date)",
    "CREATE INDEX IF NOT EXISTS idx_analytics_risk_level ON analytics_summary(risk_level)",
];

const EVENT_TYPES: [&str; 5] = [
    "DATA_ACCESS",
    "FILE_DOWNLOAD",
    "PRIVILEGED_ACTION",
    "DATA_EXPORT",
    "LOGIN",
];

/// One `risk_events` row
#[derive(Debug, Clone, PartialEq)]
pub struct EventSeed {
    pub user_id: String,
    pub event_type: String,
    pub timestamp: String,
    pub risk_score: f64,
    pub risk_level: String,
    pub sensitive_data_access: bool,
    pub unusual_time: bool,
    pub large_data_transfer: bool,
    pub privileged_action: bool,
}

/// One `analytics_summary` row
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySeed {
    pub date: String,
    pub risk_level: String,
    pub event_count: i64,
    pub avg_risk_score: f64,
    pub max_risk_score: f64,
}

/// Risk level bucket for a score
pub fn classify(score: f64) -> &'static str {
    if score >= 70.0 {
        "HIGH"
    } else if score >= 40.0 {
        "MEDIUM"
    } else {
        "LOW"
    }
}

/// The fixed sample events shipped for local development
pub fn sample_events() -> Vec<EventSeed> {
    // flags: sensitive data, unusual time, large transfer, privileged
    [
        ("user001", "DATA_ACCESS", "2024-01-15 10:30:00", 30.0, [1, 0, 0, 0]),
        ("user002", "FILE_DOWNLOAD", "2024-01-15 14:20:00", 70.0, [1, 0, 1, 0]),
        ("user003", "PRIVILEGED_ACTION", "2024-01-15 22:15:00", 65.0, [0, 1, 0, 1]),
        ("user001", "DATA_EXPORT", "2024-01-16 09:45:00", 85.0, [1, 0, 1, 1]),
        ("user004", "LOGIN", "2024-01-16 11:20:00", 20.0, [0, 0, 0, 0]),
    ]
    .into_iter()
    .map(|(user, event_type, timestamp, score, flags)| EventSeed {
        user_id: user.to_string(),
        event_type: event_type.to_string(),
        timestamp: timestamp.to_string(),
        risk_score: score,
        risk_level: classify(score).to_string(),
        sensitive_data_access: flags[0] == 1,
        unusual_time: flags[1] == 1,
        large_data_transfer: flags[2] == 1,
        privileged_action: flags[3] == 1,
    })
    .collect()
}

/// The fixed sample summary rows shipped for local development
pub fn sample_summaries() -> Vec<SummarySeed> {
    [
        ("2024-01-15", "LOW", 30.0),
        ("2024-01-15", "MEDIUM", 65.0),
        ("2024-01-15", "HIGH", 70.0),
        ("2024-01-16", "LOW", 20.0),
        ("2024-01-16", "HIGH", 85.0),
    ]
    .into_iter()
    .map(|(date, level, score)| SummarySeed {
        date: date.to_string(),
        risk_level: level.to_string(),
        event_count: 1,
        avg_risk_score: score,
        max_risk_score: score,
    })
    .collect()
}

/// `count` generated events, one minute apart, newest at `newest`
pub fn synthetic_events(count: usize, newest: NaiveDateTime) -> Vec<EventSeed> {
    (0..count)
        .map(|i| {
            let score = ((i * 37) % 100) as f64;
            let timestamp = newest - Duration::minutes(i as i64);
            EventSeed {
                user_id: format!("user{:03}", i % 50),
                event_type: EVENT_TYPES[i % EVENT_TYPES.len()].to_string(),
                timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
                risk_score: score,
                risk_level: classify(score).to_string(),
                sensitive_data_access: i % 3 == 0,
                unusual_time: i % 7 == 0,
                large_data_transfer: score >= 70.0,
                privileged_action: i % 11 == 0,
            }
        })
        .collect()
}

/// Open `path` for writing, creating the file and its directory if needed
pub async fn open_writable(path: &Path) -> Result<SqliteConnection> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(conn)
}

async fn run_ddl(conn: &mut SqliteConnection, statements: &[&str]) -> Result<()> {
    for &statement in statements {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

pub async fn create_events_schema(conn: &mut SqliteConnection) -> Result<()> {
    run_ddl(conn, &EVENTS_SCHEMA).await
}

pub async fn create_analytics_schema(conn: &mut SqliteConnection) -> Result<()> {
    run_ddl(conn, &ANALYTICS_SCHEMA).await
}

/// Insert events in a single transaction
pub async fn insert_events(conn: &mut SqliteConnection, events: &[EventSeed]) -> Result<u64> {
    let mut tx = conn.begin().await?;
    let mut inserted = 0;

    for e in events {
        inserted += sqlx::query(
            r#"
            INSERT INTO risk_events
            (user_id, event_type, timestamp, risk_score, risk_level,
             sensitive_data_access, unusual_time, large_data_transfer, privileged_action)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&e.user_id)
        .bind(&e.event_type)
        .bind(&e.timestamp)
        .bind(e.risk_score)
        .bind(&e.risk_level)
        .bind(e.sensitive_data_access as i64)
        .bind(e.unusual_time as i64)
        .bind(e.large_data_transfer as i64)
        .bind(e.privileged_action as i64)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Insert summary rows; existing (date, risk_level) pairs are left alone
pub async fn insert_summaries(
    conn: &mut SqliteConnection,
    summaries: &[SummarySeed],
) -> Result<u64> {
    let mut tx = conn.begin().await?;
    let mut inserted = 0;

    for s in summaries {
        inserted += sqlx::query(
            r#"
            INSERT OR IGNORE INTO analytics_summary
            (date, risk_level, event_count, avg_risk_score, max_risk_score)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&s.date)
        .bind(&s.risk_level)
        .bind(s.event_count)
        .bind(s.avg_risk_score)
        .bind(s.max_risk_score)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn event_count(conn: &mut SqliteConnection) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS cnt FROM risk_events")
        .fetch_one(&mut *conn)
        .await?;
    Ok(row.get("cnt"))
}

/// Create the events database. Sample events go in only when the table is
/// empty; `synthetic` generated events are always appended.
pub async fn seed_events_database(
    path: &Path,
    synthetic: usize,
    newest: NaiveDateTime,
) -> Result<u64> {
    let mut conn = open_writable(path).await?;
    create_events_schema(&mut conn).await?;

    let mut inserted = 0;
    if event_count(&mut conn).await? == 0 {
        inserted += insert_events(&mut conn, &sample_events()).await?;
    }
    if synthetic > 0 {
        inserted += insert_events(&mut conn, &synthetic_events(synthetic, newest)).await?;
    }

    conn.close().await?;
    info!("Seeded {} events into {}", inserted, path.display());
    Ok(inserted)
}

/// Create the analytics database with the sample summary rows
pub async fn seed_analytics_database(path: &Path) -> Result<u64> {
    let mut conn = open_writable(path).await?;
    create_analytics_schema(&mut conn).await?;
    let inserted = insert_summaries(&mut conn, &sample_summaries()).await?;

    conn.close().await?;
    info!("Seeded {} summary rows into {}", inserted, path.display());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn newest() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(70.0), "HIGH");
        assert_eq!(classify(69.9), "MEDIUM");
        assert_eq!(classify(40.0), "MEDIUM");
        assert_eq!(classify(39.9), "LOW");
    }

    #[test]
    fn test_sample_events_levels_follow_scores() {
        let levels: Vec<String> = sample_events().into_iter().map(|e| e.risk_level).collect();
        assert_eq!(levels, vec!["LOW", "HIGH", "MEDIUM", "HIGH", "LOW"]);
        assert!(sample_events()[3].privileged_action);
    }

    #[test]
    fn test_synthetic_timestamps_strictly_decrease() {
        let events = synthetic_events(3, newest());
        let stamps: Vec<&str> = events.iter().map(|e| e.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec![
                "2024-03-01 12:00:00",
                "2024-03-01 11:59:00",
                "2024-03-01 11:58:00"
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_events_is_idempotent_for_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("databases").join("insider_risk.db");

        assert_eq!(seed_events_database(&path, 0, newest()).await.unwrap(), 5);
        assert_eq!(seed_events_database(&path, 0, newest()).await.unwrap(), 0);
        assert_eq!(seed_events_database(&path, 10, newest()).await.unwrap(), 10);

        let mut conn = open_writable(&path).await.unwrap();
        assert_eq!(event_count(&mut conn).await.unwrap(), 15);
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_analytics_ignores_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.db");

        assert_eq!(seed_analytics_database(&path).await.unwrap(), 5);
        assert_eq!(seed_analytics_database(&path).await.unwrap(), 0);
    }
}
