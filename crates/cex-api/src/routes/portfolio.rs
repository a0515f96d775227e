//! # Portfolio API
//!
//! Holdings summary, trade recording, price updates, and the watchlist.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/portfolio/summary` | `portfolio_summary` |
//! | `GET` | `/api/portfolio/trades` | `list_trades` |
//! | `POST` | `/api/portfolio/trades` | `record_trade` |
//! | `POST` | `/api/portfolio/prices` | `update_price` |
//! | `GET` | `/api/portfolio/watchlist` | `list_watchlist` |
//! | `POST` | `/api/portfolio/watchlist` | `add_watchlist_item` |
//! | `DELETE` | `/api/portfolio/watchlist` | `remove_watchlist_item` |
//! | `POST` | `/api/portfolio/watchlist/prices` | `refresh_watchlist_prices` |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use cex_core::{AssetSymbol, TradeSide};
use cex_state::{MarketTick, NewTrade, NewWatchlistItem, PortfolioSummary};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request to record an executed trade.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordTradeRequest {
    /// Traded symbol (e.g. `BTC/USDT`).
    #[schema(value_type = String)]
    pub symbol: AssetSymbol,
    /// `"buy"` or `"sell"`.
    #[schema(value_type = String)]
    pub side: TradeSide,
    /// Quantity traded.
    pub amount: f64,
    /// Execution price.
    pub price: f64,
    /// Exchange fee; defaults to zero.
    #[serde(default)]
    pub fee: f64,
}

/// Request to update a held position's market price.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    /// Position symbol.
    #[schema(value_type = String)]
    pub symbol: AssetSymbol,
    /// New market price.
    pub price: f64,
}

/// Request to add a watchlist entry.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistRequest {
    /// Symbol to watch.
    #[schema(value_type = String)]
    pub symbol: AssetSymbol,
    /// Display name.
    pub name: String,
    /// Last known price.
    pub current_price: f64,
    /// Absolute 24-hour change.
    #[serde(default)]
    pub change_24h: f64,
    /// Relative 24-hour change.
    #[serde(default)]
    pub change_percentage_24h: f64,
    /// 24-hour traded volume.
    #[serde(default)]
    pub volume_24h: f64,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: f64,
}

/// Query parameter selecting a watchlist symbol.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WatchlistQuery {
    /// Symbol to remove.
    pub symbol: String,
}

/// A batch of market ticks.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TicksRequest {
    /// Latest market data per symbol.
    #[schema(value_type = Vec<Object>)]
    pub ticks: Vec<MarketTick>,
}

/// Build the portfolio router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio/summary", get(portfolio_summary))
        .route("/api/portfolio/trades", get(list_trades).post(record_trade))
        .route("/api/portfolio/prices", post(update_price))
        .route(
            "/api/portfolio/watchlist",
            get(list_watchlist)
                .post(add_watchlist_item)
                .delete(remove_watchlist_item),
        )
        .route(
            "/api/portfolio/watchlist/prices",
            post(refresh_watchlist_prices),
        )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/portfolio/summary — Totals, PnL, and per-asset breakdown.
#[utoipa::path(
    get,
    path = "/api/portfolio/summary",
    responses(
        (status = 200, description = "Portfolio summary"),
    ),
    tag = "portfolio"
)]
pub(crate) async fn portfolio_summary(State(state): State<AppState>) -> Json<PortfolioSummary> {
    Json(state.portfolio.summary())
}

/// GET /api/portfolio/trades — Trade history, newest first.
#[utoipa::path(
    get,
    path = "/api/portfolio/trades",
    responses(
        (status = 200, description = "Trade history"),
    ),
    tag = "portfolio"
)]
pub(crate) async fn list_trades(State(state): State<AppState>) -> Json<serde_json::Value> {
    let trades = state.portfolio.trade_history();
    Json(serde_json::json!({ "trades": trades, "total": trades.len() }))
}

/// POST /api/portfolio/trades — Record an executed trade.
#[utoipa::path(
    post,
    path = "/api/portfolio/trades",
    request_body = RecordTradeRequest,
    responses(
        (status = 201, description = "Trade recorded"),
        (status = 404, description = "Selling an unheld asset", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid amounts or oversell", body = crate::error::ErrorBody),
    ),
    tag = "portfolio"
)]
pub(crate) async fn record_trade(
    State(state): State<AppState>,
    body: Result<Json<RecordTradeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;

    let record = state.portfolio.record_trade(NewTrade {
        symbol: req.symbol,
        side: req.side,
        amount: req.amount,
        price: req.price,
        fee: req.fee,
    })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/portfolio/prices — Update a position's market price.
#[utoipa::path(
    post,
    path = "/api/portfolio/prices",
    request_body = UpdatePriceRequest,
    responses(
        (status = 200, description = "Updated position"),
        (status = 404, description = "No such position", body = crate::error::ErrorBody),
    ),
    tag = "portfolio"
)]
pub(crate) async fn update_price(
    State(state): State<AppState>,
    body: Result<Json<UpdatePriceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;
    let asset = state.portfolio.update_asset_price(&req.symbol, req.price)?;
    Ok(Json(asset))
}

/// GET /api/portfolio/watchlist — The watchlist.
#[utoipa::path(
    get,
    path = "/api/portfolio/watchlist",
    responses(
        (status = 200, description = "Watchlist entries"),
    ),
    tag = "portfolio"
)]
pub(crate) async fn list_watchlist(State(state): State<AppState>) -> Json<serde_json::Value> {
    let watchlist = state.portfolio.watchlist();
    Json(serde_json::json!({ "watchlist": watchlist, "total": watchlist.len() }))
}

/// POST /api/portfolio/watchlist — Add a symbol to the watchlist.
#[utoipa::path(
    post,
    path = "/api/portfolio/watchlist",
    request_body = AddWatchlistRequest,
    responses(
        (status = 201, description = "Watchlist entry added"),
        (status = 409, description = "Symbol already watched", body = crate::error::ErrorBody),
    ),
    tag = "portfolio"
)]
pub(crate) async fn add_watchlist_item(
    State(state): State<AppState>,
    body: Result<Json<AddWatchlistRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;

    let item = state.portfolio.add_to_watchlist(NewWatchlistItem {
        symbol: req.symbol,
        name: req.name,
        current_price: req.current_price,
        change_24h: req.change_24h,
        change_percentage_24h: req.change_percentage_24h,
        volume_24h: req.volume_24h,
        market_cap: req.market_cap,
    })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/portfolio/watchlist?symbol=X — Remove a watched symbol.
///
/// The symbol travels as a query parameter because pair symbols contain
/// `/` and cannot be path segments.
#[utoipa::path(
    delete,
    path = "/api/portfolio/watchlist",
    params(("symbol" = String, Query, description = "Symbol to remove")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Symbol not watched", body = crate::error::ErrorBody),
    ),
    tag = "portfolio"
)]
pub(crate) async fn remove_watchlist_item(
    State(state): State<AppState>,
    Query(query): Query<WatchlistQuery>,
) -> Result<StatusCode, AppError> {
    let symbol = AssetSymbol::new(&query.symbol)?;
    state.portfolio.remove_from_watchlist(&symbol)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/portfolio/watchlist/prices — Refresh watchlist from ticks.
#[utoipa::path(
    post,
    path = "/api/portfolio/watchlist/prices",
    request_body = TicksRequest,
    responses(
        (status = 200, description = "Refreshed watchlist"),
    ),
    tag = "portfolio"
)]
pub(crate) async fn refresh_watchlist_prices(
    State(state): State<AppState>,
    body: Result<Json<TicksRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = extract_json(body)?;
    state.portfolio.update_watchlist_prices(&req.ticks);
    let watchlist = state.portfolio.watchlist();
    Ok(Json(
        serde_json::json!({ "watchlist": watchlist, "total": watchlist.len() }),
    ))
}
