//! Core error types for the risk dashboard gateway

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database file not found at: {}", path.display())]
    NotFound { path: PathBuf, parent_exists: bool },

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Bad input: {0}")]
    BadInput(String),
}

impl CoreError {
    /// Internal diagnostic payload, not meant for clients by default
    pub fn diagnostic(&self) -> String {
        match self {
            CoreError::NotFound {
                path,
                parent_exists,
            } => format!(
                "path={} parent_directory_exists={}",
                path.display(),
                parent_exists
            ),
            CoreError::QueryFailed(detail) => detail.clone(),
            CoreError::BadInput(message) => message.clone(),
        }
    }

    /// Whether the failure was caused by the caller rather than the infrastructure
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::BadInput(_))
    }
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::QueryFailed(err.to_string())
    }
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CoreError::NotFound {
            path: PathBuf::from("/data/databases/insider_risk.db"),
            parent_exists: false,
        };
        assert_eq!(
            err.to_string(),
            "Database file not found at: /data/databases/insider_risk.db"
        );
        assert!(err.diagnostic().contains("parent_directory_exists=false"));
    }

    #[test]
    fn test_sqlx_error_becomes_query_failed() {
        let err: CoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, CoreError::QueryFailed(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_bad_input_is_client_error() {
        let err = CoreError::BadInput("limit must be a positive integer".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.diagnostic(), "limit must be a positive integer");
    }
}
