//! # cex-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the CEX demo API.
//! Binds to a configurable port (default 8080).
//!
//! ## Environment
//!
//! - `PORT` — listen port (default 8080)
//! - `CEX_DATA_DIR` — snapshot vault directory; absent means in-memory
//! - `CEX_MIN_AGE` — minimum age for the verification flow (default 18)

use anyhow::Context;

use cex_api::state::{AppConfig, AppState, DEFAULT_MIN_AGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let data_dir = std::env::var("CEX_DATA_DIR").ok().map(Into::into);
    if data_dir.is_none() {
        tracing::warn!("CEX_DATA_DIR not set — running in-memory, state is lost on restart");
    }

    let min_age: u32 = std::env::var("CEX_MIN_AGE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MIN_AGE);

    let config = AppConfig {
        port,
        data_dir,
        min_age,
    };

    let state = AppState::try_with_config(config).context("failed to initialize state")?;
    let app = cex_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("CEX API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
