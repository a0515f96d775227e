//! # Proof Verification & Document Flow
//!
//! The server side of the age-verification flow:
//!
//! - `/api/verify` checks a submitted proof envelope and reports the
//!   verdict.
//! - `/api/verify/extract` runs the date extractor over recognized
//!   document text (the client performs the actual OCR).
//! - `/api/verify/prove` generates a simulated proof for an extracted
//!   birth date.
//!
//! Extraction failure is not an HTTP error — the outcome envelope
//! reports `success: false` with the reason, mirroring the best-effort
//! contract of the scanner.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cex_core::DateInfo;
use cex_ocr::extract_date_from_text;
use cex_zkp::{AgeCircuit, ProofData, SimulatedGroth16};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

/// Proof verification request — the wire envelope itself.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    /// The proof payload.
    #[schema(value_type = Object)]
    pub proof: cex_zkp::AgeProofPayload,
    /// Ordered public signals.
    pub public_signals: Vec<String>,
}

/// Proof verification verdict.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Whether the proof verified.
    pub verified: bool,
    /// Verification time, ISO 8601 UTC.
    pub timestamp: String,
}

/// Date extraction request: raw recognized text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    /// Text produced by the image-to-text engine.
    pub text: String,
}

impl Validate for ExtractRequest {
    fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        Ok(())
    }
}

/// Date extraction outcome envelope.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    /// Whether a valid date was found.
    pub success: bool,
    /// The extracted date, when successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub date_info: Option<DateInfo>,
    /// Failure reason, when unsuccessful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Proof generation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProveRequest {
    /// The prover's birth date.
    #[schema(value_type = Object)]
    pub birth_date: DateInfo,
    /// Comparison date; defaults to today.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub current_date: Option<DateInfo>,
    /// Age threshold; defaults to the configured minimum.
    #[serde(default)]
    pub min_age: Option<u32>,
}

/// Build the verification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/verify", post(verify_proof))
        .route("/api/verify/extract", post(extract_date))
        .route("/api/verify/prove", post(generate_proof))
}

/// POST /api/verify — Verify a proof envelope.
#[utoipa::path(
    post,
    path = "/api/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification verdict", body = VerifyResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "verify"
)]
pub(crate) async fn verify_proof(
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<VerifyResponse>, AppError> {
    let req = extract_json(body)?;
    let envelope = ProofData {
        proof: req.proof,
        public_signals: req.public_signals,
    };

    let verified = SimulatedGroth16.verify_envelope(&envelope);
    tracing::info!(verified, "age proof verification");

    Ok(Json(VerifyResponse {
        verified,
        timestamp: cex_core::Timestamp::now().to_canonical_string(),
    }))
}

/// POST /api/verify/extract — Extract a birth date from recognized text.
#[utoipa::path(
    post,
    path = "/api/verify/extract",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Extraction outcome", body = ExtractResponse),
    ),
    tag = "verify"
)]
pub(crate) async fn extract_date(
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let req = extract_validated_json(body)?;

    let response = match extract_date_from_text(&req.text) {
        Ok(date) => ExtractResponse {
            success: true,
            date_info: Some(date),
            error: None,
        },
        Err(e) => ExtractResponse {
            success: false,
            date_info: None,
            error: Some(e.to_string()),
        },
    };
    Ok(Json(response))
}

/// POST /api/verify/prove — Generate a simulated age proof.
#[utoipa::path(
    post,
    path = "/api/verify/prove",
    request_body = ProveRequest,
    responses(
        (status = 200, description = "Proof envelope"),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
    ),
    tag = "verify"
)]
pub(crate) async fn generate_proof(
    State(state): State<AppState>,
    body: Result<Json<ProveRequest>, JsonRejection>,
) -> Result<Json<ProofData>, AppError> {
    let req = extract_json(body)?;

    // Serde fills the struct without range checks; re-validate here so a
    // month-13 birth date is a 422, not a silent circuit input.
    let birth_date = DateInfo::new(req.birth_date.year, req.birth_date.month, req.birth_date.day)?;
    let current_date = match req.current_date {
        Some(d) => DateInfo::new(d.year, d.month, d.day)?,
        None => DateInfo::today(),
    };

    let circuit = AgeCircuit {
        birth_date,
        current_date,
        min_age: req.min_age.unwrap_or(state.config.min_age),
    };

    let envelope = SimulatedGroth16
        .prove_age(&circuit)
        .map_err(|e| AppError::Internal(format!("proof generation failed: {e}")))?;

    Ok(Json(envelope))
}
