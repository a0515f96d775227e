//! # Wallet Deposit API
//!
//! Deposit address and network metadata per asset, served from the
//! static wallet catalog. `POST` returns full deposit details (address,
//! QR image URL, memo); `GET` returns network parameters only.

use axum::extract::rejection::JsonRejection;
use axum::extract::Query;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use cex_core::AssetSymbol;
use cex_state::{deposit_info, network_config, DepositInfo};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Deposit details request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Asset to deposit (e.g. `BTC`).
    pub asset: String,
    /// Intended amount; informational only.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Preferred network; informational only — the catalog decides.
    #[serde(default)]
    pub network: Option<String>,
}

/// Deposit details response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DepositResponse {
    pub success: bool,
    /// Address, QR, memo, and network parameters.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub info: DepositInfo,
}

/// Query parameters for the GET variant.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepositQuery {
    /// Asset to look up.
    pub asset: String,
}

/// Build the wallet router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/wallet/deposit",
        post(create_deposit).get(deposit_network_info),
    )
}

/// Parse and look up an asset, mapping failures to 400s.
///
/// Both unsupported and malformed assets are client errors at this
/// endpoint.
fn parse_asset(raw: &str) -> Result<AssetSymbol, AppError> {
    AssetSymbol::new(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// POST /api/wallet/deposit — Full deposit details for an asset.
#[utoipa::path(
    post,
    path = "/api/wallet/deposit",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Deposit details", body = DepositResponse),
        (status = 400, description = "Missing or unsupported asset", body = crate::error::ErrorBody),
    ),
    tag = "wallet"
)]
pub(crate) async fn create_deposit(
    body: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<DepositResponse>, AppError> {
    let req = extract_json(body)?;
    let asset = parse_asset(&req.asset)?;

    let info = deposit_info(&asset)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported asset: {asset}")))?;

    Ok(Json(DepositResponse {
        success: true,
        info,
    }))
}

/// GET /api/wallet/deposit?asset=X — Network parameters for an asset.
#[utoipa::path(
    get,
    path = "/api/wallet/deposit",
    params(("asset" = String, Query, description = "Asset symbol")),
    responses(
        (status = 200, description = "Network parameters"),
        (status = 400, description = "Missing or unsupported asset", body = crate::error::ErrorBody),
    ),
    tag = "wallet"
)]
pub(crate) async fn deposit_network_info(
    Query(query): Query<DepositQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let asset = parse_asset(&query.asset)?;

    let config = network_config(&asset)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported asset: {asset}")))?;

    let mut value = serde_json::to_value(config)
        .map_err(|e| AppError::Internal(format!("serialization error: {e}")))?;
    if let Some(map) = value.as_object_mut() {
        map.insert("success".to_string(), serde_json::Value::Bool(true));
        map.insert(
            "asset".to_string(),
            serde_json::Value::String(asset.to_string()),
        );
    }

    Ok(Json(value))
}
