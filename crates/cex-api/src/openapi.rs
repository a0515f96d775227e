//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEX Demo API",
        version = "0.3.2",
        description = "Demo cryptocurrency-exchange backend: age-verified login with simulated zero-knowledge proofs, wallet deposit metadata, solvency attestation, and the portfolio / staking / notification surfaces.",
        license(name = "MIT")
    ),
    paths(
        // Auth
        crate::routes::login::login,
        // Verification
        crate::routes::verify::verify_proof,
        crate::routes::verify::extract_date,
        crate::routes::verify::generate_proof,
        // Wallet
        crate::routes::wallet::create_deposit,
        crate::routes::wallet::deposit_network_info,
        // Solvency
        crate::routes::solvency::solvency_proof,
        crate::routes::solvency::submit_solvency_proof,
        // Portfolio
        crate::routes::portfolio::portfolio_summary,
        crate::routes::portfolio::list_trades,
        crate::routes::portfolio::record_trade,
        crate::routes::portfolio::update_price,
        crate::routes::portfolio::list_watchlist,
        crate::routes::portfolio::add_watchlist_item,
        crate::routes::portfolio::remove_watchlist_item,
        crate::routes::portfolio::refresh_watchlist_prices,
        // Staking
        crate::routes::staking::list_pools,
        crate::routes::staking::list_positions,
        crate::routes::staking::list_rewards,
        crate::routes::staking::stake,
        crate::routes::staking::unstake,
        crate::routes::staking::claim_rewards,
        crate::routes::staking::accrue,
        // Notifications & alerts
        crate::routes::notifications::list_notifications,
        crate::routes::notifications::push_notification,
        crate::routes::notifications::mark_read,
        crate::routes::notifications::delete_notification,
        crate::routes::notifications::clear_notifications,
        crate::routes::notifications::list_alerts,
        crate::routes::notifications::create_alert,
        crate::routes::notifications::update_alert,
        crate::routes::notifications::delete_alert,
        crate::routes::notifications::check_alerts,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Auth DTOs
        crate::routes::login::LoginRequest,
        crate::routes::login::LoginResponse,
        // Verification DTOs
        crate::routes::verify::VerifyRequest,
        crate::routes::verify::VerifyResponse,
        crate::routes::verify::ExtractRequest,
        crate::routes::verify::ExtractResponse,
        crate::routes::verify::ProveRequest,
        // Wallet DTOs
        crate::routes::wallet::DepositRequest,
        crate::routes::wallet::DepositResponse,
        // Solvency DTOs
        crate::routes::solvency::SolvencySubmitResponse,
        // Portfolio DTOs
        crate::routes::portfolio::RecordTradeRequest,
        crate::routes::portfolio::UpdatePriceRequest,
        crate::routes::portfolio::AddWatchlistRequest,
        crate::routes::portfolio::TicksRequest,
        // Staking DTOs
        crate::routes::staking::StakeRequest,
        crate::routes::staking::UnstakeRequest,
        crate::routes::staking::ClaimRequest,
        // Notification DTOs
        crate::routes::notifications::PushNotificationRequest,
        crate::routes::notifications::MarkReadRequest,
        crate::routes::notifications::CreateAlertRequest,
        crate::routes::notifications::UpdateAlertRequest,
    )),
    tags(
        (name = "auth", description = "Age-verified demo login"),
        (name = "verify", description = "Proof verification, date extraction, proof generation"),
        (name = "wallet", description = "Deposit address and network metadata"),
        (name = "solvency", description = "Solvency attestation"),
        (name = "portfolio", description = "Holdings, trades, watchlist"),
        (name = "staking", description = "Pools, positions, rewards"),
        (name = "notifications", description = "Notification feed"),
        (name = "alerts", description = "Standing price alerts"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
