//! # Staking API
//!
//! Pool catalog, position lifecycle, and reward claims.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/staking/pools` | `list_pools` |
//! | `GET` | `/api/staking/positions` | `list_positions` |
//! | `GET` | `/api/staking/rewards` | `list_rewards` |
//! | `POST` | `/api/staking/stake` | `stake` |
//! | `POST` | `/api/staking/unstake` | `unstake` |
//! | `POST` | `/api/staking/claim` | `claim_rewards` |
//! | `POST` | `/api/staking/accrue` | `accrue` |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Request to stake into a pool.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StakeRequest {
    /// Target pool.
    pub pool_id: Uuid,
    /// Quantity to stake.
    pub amount: f64,
    /// Optional lock duration in days.
    #[serde(default)]
    pub duration_days: Option<u32>,
}

/// Request to unstake from a position.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UnstakeRequest {
    /// Position to reduce.
    pub position_id: Uuid,
    /// Quantity to withdraw.
    pub amount: f64,
}

/// Request to claim a position's pending rewards.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClaimRequest {
    /// Position to claim from.
    pub position_id: Uuid,
}

/// Build the staking router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/staking/pools", get(list_pools))
        .route("/api/staking/positions", get(list_positions))
        .route("/api/staking/rewards", get(list_rewards))
        .route("/api/staking/stake", post(stake))
        .route("/api/staking/unstake", post(unstake))
        .route("/api/staking/claim", post(claim_rewards))
        .route("/api/staking/accrue", post(accrue))
}

/// GET /api/staking/pools — The pool catalog.
#[utoipa::path(
    get,
    path = "/api/staking/pools",
    responses(
        (status = 200, description = "Pool catalog"),
    ),
    tag = "staking"
)]
pub(crate) async fn list_pools(State(state): State<AppState>) -> Json<serde_json::Value> {
    let pools = state.staking.pools();
    Json(serde_json::json!({ "pools": pools, "total": pools.len() }))
}

/// GET /api/staking/positions — The user's positions.
#[utoipa::path(
    get,
    path = "/api/staking/positions",
    responses(
        (status = 200, description = "Staking positions"),
    ),
    tag = "staking"
)]
pub(crate) async fn list_positions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let positions = state.staking.positions();
    Json(serde_json::json!({ "positions": positions, "total": positions.len() }))
}

/// GET /api/staking/rewards — Reward history, newest first.
#[utoipa::path(
    get,
    path = "/api/staking/rewards",
    responses(
        (status = 200, description = "Reward history"),
    ),
    tag = "staking"
)]
pub(crate) async fn list_rewards(State(state): State<AppState>) -> Json<serde_json::Value> {
    let rewards = state.staking.rewards();
    Json(serde_json::json!({ "rewards": rewards, "total": rewards.len() }))
}

/// POST /api/staking/stake — Stake into a pool.
#[utoipa::path(
    post,
    path = "/api/staking/stake",
    request_body = StakeRequest,
    responses(
        (status = 201, description = "Position created"),
        (status = 404, description = "Pool not found", body = crate::error::ErrorBody),
        (status = 409, description = "Pool inactive or at capacity", body = crate::error::ErrorBody),
        (status = 422, description = "Below pool minimum", body = crate::error::ErrorBody),
    ),
    tag = "staking"
)]
pub(crate) async fn stake(
    State(state): State<AppState>,
    body: Result<Json<StakeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;
    let position = state
        .staking
        .stake(req.pool_id, req.amount, req.duration_days)?;
    Ok((StatusCode::CREATED, Json(position)))
}

/// POST /api/staking/unstake — Withdraw from a position.
#[utoipa::path(
    post,
    path = "/api/staking/unstake",
    request_body = UnstakeRequest,
    responses(
        (status = 200, description = "Unstaked"),
        (status = 404, description = "Position not found", body = crate::error::ErrorBody),
        (status = 422, description = "More than staked", body = crate::error::ErrorBody),
    ),
    tag = "staking"
)]
pub(crate) async fn unstake(
    State(state): State<AppState>,
    body: Result<Json<UnstakeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = extract_json(body)?;
    state.staking.unstake(req.position_id, req.amount)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/staking/claim — Claim pending rewards.
#[utoipa::path(
    post,
    path = "/api/staking/claim",
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "Reward claimed"),
        (status = 404, description = "Position not found", body = crate::error::ErrorBody),
        (status = 409, description = "Nothing to claim", body = crate::error::ErrorBody),
    ),
    tag = "staking"
)]
pub(crate) async fn claim_rewards(
    State(state): State<AppState>,
    body: Result<Json<ClaimRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;
    let reward = state.staking.claim_rewards(req.position_id)?;
    Ok(Json(reward))
}

/// POST /api/staking/accrue — Apply one day of reward accrual.
///
/// Driven by an external scheduler in deployment; exposed for the demo
/// so accrual can be triggered by hand.
#[utoipa::path(
    post,
    path = "/api/staking/accrue",
    responses(
        (status = 200, description = "Accrual applied"),
    ),
    tag = "staking"
)]
pub(crate) async fn accrue(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.staking.accrue_daily();
    let positions = state.staking.positions();
    Json(serde_json::json!({ "success": true, "positions": positions.len() }))
}
