//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from `errand-state` and `errand-store` to HTTP status
//! codes with JSON error bodies. Internal error details are logged, never
//! returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use errand_state::ErrandError;
use errand_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422). Covers both malformed field values
    /// and business-rule violations in the payload.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller's role may not perform this action (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request conflicts with the record's current state (409) —
    /// e.g., a transition the lifecycle table rejects.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The HTTP status and machine-readable code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "internal error".to_string()
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ErrandError> for AppError {
    fn from(err: ErrandError) -> Self {
        match err {
            // Payload-level mistakes.
            ErrandError::InvalidRating(_) => Self::Validation(err.to_string()),
            // Everything else is a clash with the record's current state.
            ErrandError::InvalidTransition { .. }
            | ErrandError::Terminal { .. }
            | ErrandError::AlreadyPaid { .. }
            | ErrandError::DisputeExists { .. }
            | ErrandError::NoOpenDispute { .. }
            | ErrandError::DisputeNotAvailable { .. }
            | ErrandError::ReviewNotAvailable { .. }
            | ErrandError::DuplicateReview { .. }
            | ErrandError::CodeAlreadyUsed => Self::Conflict(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errand_rules::ErrandStatus;

    #[test]
    fn test_lifecycle_errors_map_to_conflict() {
        let app_err: AppError = ErrandError::InvalidTransition {
            from: ErrandStatus::Open,
            to: ErrandStatus::Done,
        }
        .into();
        assert!(matches!(app_err, AppError::Conflict(_)));
    }

    #[test]
    fn test_rating_error_maps_to_validation() {
        let app_err: AppError = ErrandError::InvalidRating(9).into();
        assert!(matches!(app_err, AppError::Validation(_)));
    }
}
