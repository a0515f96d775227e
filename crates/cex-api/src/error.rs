//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from cex-state, cex-core, and cex-zkp to HTTP
//! status codes. Returns JSON error response bodies with error code and
//! message. Never exposes internal error details in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed or is missing fields (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request is understood but refused (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert cex-core validation errors to API errors.
impl From<cex_core::ValidationError> for AppError {
    fn from(err: cex_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert portfolio service errors to API errors.
impl From<cex_state::PortfolioError> for AppError {
    fn from(err: cex_state::PortfolioError) -> Self {
        use cex_state::PortfolioError::*;
        match &err {
            UnknownAsset(_) | NotWatched(_) => Self::NotFound(err.to_string()),
            AlreadyWatched(_) => Self::Conflict(err.to_string()),
            InsufficientHoldings { .. } | Validation(_) => Self::Validation(err.to_string()),
        }
    }
}

/// Convert staking service errors to API errors.
impl From<cex_state::StakingError> for AppError {
    fn from(err: cex_state::StakingError) -> Self {
        use cex_state::StakingError::*;
        match &err {
            PoolNotFound(_) | PositionNotFound(_) => Self::NotFound(err.to_string()),
            PoolInactive(_) | CapacityExceeded | NoRewards(_) => Self::Conflict(err.to_string()),
            BelowMinimum { .. } | InsufficientStake { .. } | Validation(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}

/// Convert notification service errors to API errors.
impl From<cex_state::NotifyError> for AppError {
    fn from(err: cex_state::NotifyError) -> Self {
        use cex_state::NotifyError::*;
        match &err {
            NotificationNotFound(_) | AlertNotFound(_) => Self::NotFound(err.to_string()),
            Validation(_) => Self::Validation(err.to_string()),
        }
    }
}

/// Convert storage errors to API errors. Vault failures are internal.
impl From<cex_core::StorageError> for AppError {
    fn from(err: cex_core::StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}
