//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use risk_dashboard_core::CoreError;

/// A failed request: the core error plus the endpoint's user-facing context
#[derive(Error, Debug)]
#[error("{context}: {source}")]
pub struct ApiError {
    context: &'static str,
    #[source]
    source: CoreError,
    expose_details: bool,
}

impl ApiError {
    pub fn new(context: &'static str, source: CoreError, expose_details: bool) -> Self {
        Self {
            context,
            source,
            expose_details,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.source.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Message safe to show any client
    pub fn public_message(&self) -> String {
        match &self.source {
            CoreError::NotFound { .. } => self.source.to_string(),
            CoreError::BadInput(message) => message.clone(),
            CoreError::QueryFailed(_) => self.context.to_string(),
        }
    }
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.public_message(),
            details: self.expose_details.then(|| self.source.diagnostic()),
        };

        (self.status(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
