//! Risk event handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::handlers::Envelope;
use crate::state::AppState;
use risk_dashboard_core::adapter::Record;
use risk_dashboard_core::query::{events_limit, ReadQuery};
use risk_dashboard_core::CoreError;

const FAILURE: &str = "Failed to fetch events";

/// Events query parameters
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Kept as text so a malformed value becomes our own 400 envelope
    pub limit: Option<String>,
}

/// List the most recent risk events
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<Record>>>> {
    let Query(query) = query.map_err(|rejection| {
        state.fail(FAILURE, CoreError::BadInput(rejection.body_text()))
    })?;

    let limit = events_limit(query.limit.as_deref(), state.config.max_events_limit)
        .map_err(|e| state.fail(FAILURE, e))?;
    debug!(limit, "Fetching recent events");

    let events = state
        .gateway
        .fetch(&state.config.events_db_path, &ReadQuery::recent_events(limit))
        .await
        .map_err(|e| state.fail(FAILURE, e))?;

    Ok(Json(Envelope::counted(events)))
}
