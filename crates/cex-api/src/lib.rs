//! # cex-api — Axum API Services for the CEX Demo Stack
//!
//! The HTTP surface of the demo exchange: age-verified login backed by
//! the simulated proof system, wallet deposit metadata, solvency
//! attestation, and the portfolio / staking / notification registries.
//!
//! ## API Surface
//!
//! | Prefix                | Module                      | Domain              |
//! |-----------------------|-----------------------------|---------------------|
//! | `/api/login`          | [`routes::login`]           | Age-verified login  |
//! | `/api/verify/*`       | [`routes::verify`]          | Proofs & extraction |
//! | `/api/wallet/*`       | [`routes::wallet`]          | Deposit metadata    |
//! | `/api/solvency/*`     | [`routes::solvency`]        | Solvency            |
//! | `/api/portfolio/*`    | [`routes::portfolio`]       | Portfolio           |
//! | `/api/staking/*`      | [`routes::staking`]         | Staking             |
//! | `/api/notifications`, `/api/alerts` | [`routes::notifications`] | Notifications |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! The API is deliberately unauthenticated and unrated — it fronts
//! demo data only. Health probes are mounted beside the API routes.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::login::router())
        .merge(routes::verify::router())
        .merge(routes::wallet::router())
        .merge(routes::solvency::router())
        .merge(routes::portfolio::router())
        .merge(routes::staking::router())
        .merge(routes::notifications::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
