//! Application configuration

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use risk_dashboard_core::paths::{ANALYTICS_DATABASE, EVENTS_DATABASE};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Resolved path of the events database
    pub events_db_path: PathBuf,
    /// Resolved path of the analytics database
    pub analytics_db_path: PathBuf,
    /// Java backend URL, handed to clients untouched
    pub java_backend_url: String,
    /// Upper clamp for the events `limit` parameter
    pub max_events_limit: u32,
    /// Per-stage gateway timeout; `None` disables it
    pub query_timeout: Option<Duration>,
    /// Include internal diagnostics in error bodies
    pub expose_error_details: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot determine working directory")?;
        Self::from_vars(|key| std::env::var(key).ok(), &cwd)
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(lookup: F, cwd: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let max_events_limit: u32 = var("EVENTS_MAX_LIMIT", "1000")
            .parse()
            .context("Invalid EVENTS_MAX_LIMIT")?;
        if max_events_limit == 0 {
            bail!("EVENTS_MAX_LIMIT must be at least 1");
        }

        let timeout_secs: u64 = var("QUERY_TIMEOUT_SECS", "10")
            .parse()
            .context("Invalid QUERY_TIMEOUT_SECS")?;

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "3000").parse().context("Invalid PORT")?,
            events_db_path: EVENTS_DATABASE.resolve_with(&lookup, cwd),
            analytics_db_path: ANALYTICS_DATABASE.resolve_with(&lookup, cwd),
            java_backend_url: var("JAVA_BACKEND_URL", "http://localhost:8080"),
            max_events_limit,
            query_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            expose_error_details: var("EXPOSE_ERROR_DETAILS", "false")
                .parse()
                .context("Invalid EXPOSE_ERROR_DETAILS")?,
        })
    }
}
