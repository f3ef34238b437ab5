//! Analytics summary handlers

use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::handlers::Envelope;
use crate::state::AppState;
use risk_dashboard_core::adapter::Record;
use risk_dashboard_core::query::ReadQuery;

/// Daily aggregates per risk level, newest first
pub async fn get_analytics(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Record>>>> {
    let analytics = state
        .gateway
        .fetch(
            &state.config.analytics_db_path,
            &ReadQuery::analytics_summary(),
        )
        .await
        .map_err(|e| state.fail("Failed to fetch analytics", e))?;

    Ok(Json(Envelope::ok(analytics)))
}
