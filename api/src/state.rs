//! Application state

use std::sync::Arc;

use risk_dashboard_core::adapter::{ConnectionFactory, SqliteConnectionFactory};
use risk_dashboard_core::{CoreError, QueryGateway};

use crate::config::AppConfig;
use crate::error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only query gateway
    pub gateway: QueryGateway,
    /// Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create application state backed by SQLite
    pub fn new(config: &AppConfig) -> Self {
        Self::with_factory(config, Arc::new(SqliteConnectionFactory::new()))
    }

    /// Create application state over any connection factory
    pub fn with_factory(config: &AppConfig, factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            gateway: QueryGateway::new(factory, config.query_timeout),
            config: Arc::new(config.clone()),
        }
    }

    /// Wrap a core failure for the response, honouring the detail policy
    pub fn fail(&self, context: &'static str, source: CoreError) -> ApiError {
        ApiError::new(context, source, self.config.expose_error_details)
    }
}
