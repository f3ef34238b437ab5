//! API handlers

pub mod analytics;
pub mod events;

use axum::{extract::State, Json};
use serde::Serialize;
use std::path::Path;

use crate::state::AppState;
use risk_dashboard_core::guard::is_file;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Envelope carrying `count` equal to the number of rows
    pub fn counted(data: Vec<T>) -> Self {
        let count = Some(data.len());
        Self {
            success: true,
            data,
            count,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub java_backend_url: String,
    pub databases: DatabasesHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabasesHealth {
    pub events: DatabaseHealth,
    pub analytics: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub path: String,
    pub exists: bool,
}

impl DatabaseHealth {
    async fn probe(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            exists: is_file(path).await,
        }
    }
}

/// Health check endpoint; reports database presence without opening them
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        java_backend_url: state.config.java_backend_url.clone(),
        databases: DatabasesHealth {
            events: DatabaseHealth::probe(&state.config.events_db_path).await,
            analytics: DatabaseHealth::probe(&state.config.analytics_db_path).await,
        },
    })
}
