//! # Age-Verified Login
//!
//! The demo login flow: credentials are accepted as-is (there is no user
//! database), but the attached age proof must verify before a session is
//! granted. Failing the age check is a 403; missing fields are a 400.

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cex_zkp::{ProofData, SimulatedGroth16};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Login request: credentials plus the age proof envelope.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password. Not checked against anything in the demo.
    pub password: String,
    /// Age proof envelope produced by the prover.
    #[schema(value_type = Object)]
    pub proof: ProofData,
}

/// Login success response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Build the login router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/login", post(login))
}

/// POST /api/login — Verify the age proof and grant a demo session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing required fields", body = crate::error::ErrorBody),
        (status = 403, description = "Age verification failed", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
pub(crate) async fn login(
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let req = extract_json(body)?;

    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("missing required fields".to_string()));
    }

    if !SimulatedGroth16.verify_envelope(&req.proof) {
        return Err(AppError::Forbidden("age verification failed".to_string()));
    }

    // A real deployment would check credentials and mint a session here.
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
    }))
}
