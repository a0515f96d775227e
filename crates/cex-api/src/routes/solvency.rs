//! # Solvency Attestation API
//!
//! Serves the published solvency figures with a transparent SHA-256
//! attestation digest. The POST variant acknowledges an externally
//! submitted report without storing it — the demo has no regulator
//! inbox behind it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::ToSchema;

use cex_core::Timestamp;
use cex_zkp::SolvencyAttestation;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Acknowledgement for a submitted solvency report.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct SolvencySubmitResponse {
    pub success: bool,
    pub message: String,
    /// The submitted payload, echoed back.
    pub data: serde_json::Value,
    /// Acknowledgement time, ISO 8601 UTC.
    pub timestamp: String,
}

/// Build the solvency router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/solvency/proof",
        get(solvency_proof).post(submit_solvency_proof),
    )
}

/// GET /api/solvency/proof — Published figures plus attestation digest.
#[utoipa::path(
    get,
    path = "/api/solvency/proof",
    responses(
        (status = 200, description = "Solvency attestation"),
    ),
    tag = "solvency"
)]
pub(crate) async fn solvency_proof(
    State(state): State<AppState>,
) -> Result<Json<SolvencyAttestation>, AppError> {
    let attestation = SolvencyAttestation::issue(state.solvency)
        .map_err(|e| AppError::Internal(format!("attestation failed: {e}")))?;
    Ok(Json(attestation))
}

/// POST /api/solvency/proof — Acknowledge a submitted report.
#[utoipa::path(
    post,
    path = "/api/solvency/proof",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Submission acknowledged", body = SolvencySubmitResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "solvency"
)]
pub(crate) async fn submit_solvency_proof(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SolvencySubmitResponse>, AppError> {
    let data = extract_json(body)?;
    Ok(Json(SolvencySubmitResponse {
        success: true,
        message: "Solvency proof submitted".to_string(),
        data,
        timestamp: Timestamp::now().to_canonical_string(),
    }))
}
