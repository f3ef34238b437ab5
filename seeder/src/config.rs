//! Seeder configuration

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use risk_dashboard_core::paths::{ANALYTICS_DATABASE, EVENTS_DATABASE};

/// Seeder configuration
#[derive(Debug, Clone)]
pub struct SeederConfig {
    /// Events database to create
    pub events_db_path: PathBuf,
    /// Analytics database to create
    pub analytics_db_path: PathBuf,
    /// Generated events appended after the samples
    pub synthetic_events: usize,
}

impl SeederConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot determine working directory")?;
        Self::from_vars(|key| std::env::var(key).ok(), &cwd)
    }

    /// Same paths as the API server resolves, so both agree on locations
    pub fn from_vars<F>(lookup: F, cwd: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            events_db_path: EVENTS_DATABASE.resolve_with(&lookup, cwd),
            analytics_db_path: ANALYTICS_DATABASE.resolve_with(&lookup, cwd),
            synthetic_events: lookup("SEED_SYNTHETIC_EVENTS")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "0".to_string())
                .parse()
                .context("Invalid SEED_SYNTHETIC_EVENTS")?,
        })
    }
}
