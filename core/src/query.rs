//! The fixed read queries the dashboard is allowed to run

use crate::error::{CoreError, Result};

/// Default number of events returned when no limit is given
pub const DEFAULT_EVENTS_LIMIT: u32 = 100;

/// Hard cap on analytics rows
pub const ANALYTICS_ROW_CAP: u32 = 30;

const RECENT_EVENTS_SQL: &str = r#"
    SELECT * FROM risk_events
    ORDER BY timestamp DESC
    LIMIT ?
"#;

// LIMIT must match ANALYTICS_ROW_CAP
const ANALYTICS_SUMMARY_SQL: &str = r#"
    SELECT
        date,
        risk_level,
        COUNT(*) as count,
        AVG(avg_risk_score) as avg_risk_score
    FROM analytics_summary
    GROUP BY date, risk_level
    ORDER BY date DESC
    LIMIT 30
"#;

/// A predefined query plus its single optional bound parameter.
///
/// Only the constructors below can build one, so no SQL text ever comes
/// from request input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadQuery {
    name: &'static str,
    sql: &'static str,
    limit: Option<i64>,
}

impl ReadQuery {
    /// Most recent events, newest first
    pub fn recent_events(limit: u32) -> Self {
        Self {
            name: "recent_events",
            sql: RECENT_EVENTS_SQL,
            limit: Some(i64::from(limit)),
        }
    }

    /// Per (date, risk level) aggregate, newest date first
    pub fn analytics_summary() -> Self {
        Self {
            name: "analytics_summary",
            sql: ANALYTICS_SUMMARY_SQL,
            limit: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    /// Value bound to the query's single `?` placeholder, if it has one
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }
}

/// Parse the `limit` query parameter for the events query.
///
/// Absent or blank means [`DEFAULT_EVENTS_LIMIT`]. Anything that is not a
/// positive integer is rejected; values above `max` are clamped to it.
pub fn events_limit(raw: Option<&str>, max: u32) -> Result<u32> {
    let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => return Ok(DEFAULT_EVENTS_LIMIT.min(max)),
    };

    let limit: u64 = raw.parse().map_err(|_| {
        CoreError::BadInput(format!("limit must be a positive integer, got '{}'", raw))
    })?;
    if limit == 0 {
        return Err(CoreError::BadInput("limit must be at least 1".to_string()));
    }

    Ok(u32::try_from(limit).unwrap_or(u32::MAX).min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_limit_defaults() {
        assert_eq!(events_limit(None, 1000).unwrap(), 100);
        assert_eq!(events_limit(Some(""), 1000).unwrap(), 100);
        assert_eq!(events_limit(None, 50).unwrap(), 50);
    }

    #[test]
    fn test_events_limit_clamps_large_values() {
        assert_eq!(events_limit(Some("25"), 1000).unwrap(), 25);
        assert_eq!(events_limit(Some("5000"), 1000).unwrap(), 1000);
        assert_eq!(events_limit(Some("99999999999999"), 1000).unwrap(), 1000);
    }

    #[test]
    fn test_events_limit_rejects_garbage() {
        for raw in ["abc", "-5", "0", "1.5", "10abc"] {
            assert!(
                matches!(events_limit(Some(raw), 1000), Err(CoreError::BadInput(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_recent_events_binds_limit() {
        let query = ReadQuery::recent_events(25);
        assert_eq!(query.limit(), Some(25));
        assert_eq!(query.sql().matches('?').count(), 1);
        assert!(query.sql().contains("ORDER BY timestamp DESC"));
    }

    #[test]
    fn test_analytics_summary_is_capped() {
        let query = ReadQuery::analytics_summary();
        assert_eq!(query.limit(), None);
        assert!(!query.sql().contains('?'));
        assert!(query
            .sql()
            .contains(&format!("LIMIT {}", ANALYTICS_ROW_CAP)));
        assert!(query.sql().contains("GROUP BY date, risk_level"));
    }
}
