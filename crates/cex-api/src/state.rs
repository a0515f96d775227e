//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds the three injected services (portfolio, staking,
//! notifications), the published solvency figures, and configuration.
//! Each service is a cheaply cloneable handle over `Arc` internals, so
//! cloning AppState shares all underlying registries.
//!
//! When a data directory is configured, every service persists its
//! collections into the same [`JsonVault`]; without one the API runs
//! in-memory only.

use std::path::PathBuf;

use cex_core::{AssetSymbol, StorageError};
use cex_state::{
    JsonVault, NotificationService, PoolKind, PortfolioService, StakingPool, StakingService,
};
use cex_zkp::SolvencyReport;
use uuid::Uuid;

/// Default minimum age enforced by the verification flow.
pub const DEFAULT_MIN_AGE: u32 = 18;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Snapshot vault directory. `None` means in-memory only.
    pub data_dir: Option<PathBuf>,
    /// Minimum age the verification flow proves against.
    pub min_age: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: None,
            min_age: DEFAULT_MIN_AGE,
        }
    }
}

/// The staking pools the demo ships with.
///
/// Catalog configuration, not user data: APYs and capacities mirror the
/// published staking product sheet.
pub fn default_pool_catalog() -> Vec<StakingPool> {
    let pool = |asset: &str,
                apy: f64,
                kind: PoolKind,
                min_amount: f64,
                max_capacity: f64,
                total_staked: f64,
                lock_period_days: Option<u32>| {
        StakingPool {
            id: Uuid::new_v4(),
            asset: AssetSymbol::new(asset).expect("catalog symbols are valid"),
            apy,
            kind,
            min_amount,
            max_capacity,
            total_staked,
            lock_period_days,
            is_active: true,
        }
    };

    vec![
        pool("ETH", 5.2, PoolKind::Flexible, 0.1, 10_000.0, 7_500.0, None),
        pool("BTC", 4.8, PoolKind::Fixed, 0.01, 500.0, 350.0, Some(90)),
        pool("USDC", 8.5, PoolKind::Flexible, 100.0, 1_000_000.0, 750_000.0, None),
        pool("SOL", 6.7, PoolKind::Fixed, 1.0, 50_000.0, 32_000.0, Some(180)),
    ]
}

/// The published solvency figures served by the attestation endpoint.
pub const PUBLISHED_SOLVENCY: SolvencyReport = SolvencyReport {
    total_assets: 2_450_000_000,
    total_liabilities: 1_820_000_000,
    proof_of_reserves: 2_100_000_000,
};

/// Shared application state accessible to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Portfolio registry.
    pub portfolio: PortfolioService,
    /// Staking registry.
    pub staking: StakingService,
    /// Notification registry.
    pub notifications: NotificationService,
    /// Published solvency figures.
    pub solvency: SolvencyReport,
    /// Application configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with default configuration (in-memory).
    ///
    /// # Panics
    ///
    /// Never panics for the default configuration: without a data
    /// directory no vault I/O occurs.
    pub fn new() -> Self {
        Self::try_with_config(AppConfig::default())
            .expect("in-memory state construction cannot fail")
    }

    /// Create application state with the given configuration.
    ///
    /// Opens the snapshot vault and hydrates every service from it when
    /// `config.data_dir` is set.
    pub fn try_with_config(config: AppConfig) -> Result<Self, StorageError> {
        let vault = match &config.data_dir {
            Some(dir) => Some(JsonVault::open(dir)?),
            None => None,
        };

        Ok(Self {
            portfolio: PortfolioService::new(vault.clone())?,
            staking: StakingService::new(default_pool_catalog(), vault.clone())?,
            notifications: NotificationService::new(vault)?,
            solvency: PUBLISHED_SOLVENCY,
            config,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_new_creates_empty_registries() {
        let state = AppState::new();
        assert!(state.portfolio.summary().assets.is_empty());
        assert!(state.staking.positions().is_empty());
        assert!(state.notifications.notifications().is_empty());
        assert_eq!(state.staking.pools().len(), 4);
    }

    #[test]
    fn app_state_new_uses_default_config() {
        let state = AppState::new();
        assert_eq!(state.config.port, 8080);
        assert_eq!(state.config.min_age, 18);
        assert!(state.config.data_dir.is_none());
    }

    #[test]
    fn default_catalog_symbols_and_terms() {
        let pools = default_pool_catalog();
        let assets: Vec<&str> = pools.iter().map(|p| p.asset.as_str()).collect();
        assert_eq!(assets, vec!["ETH", "BTC", "USDC", "SOL"]);
        assert!(pools.iter().all(|p| p.is_active));
        assert_eq!(pools[1].lock_period_days, Some(90));
    }

    #[test]
    fn published_solvency_is_solvent() {
        assert!(PUBLISHED_SOLVENCY.is_solvent());
    }

    #[test]
    fn state_with_data_dir_hydrates_from_vault() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: Some(tmp.path().to_path_buf()),
            ..AppConfig::default()
        };

        {
            let state = AppState::try_with_config(config.clone()).unwrap();
            state.notifications.push(cex_state::NewNotification {
                title: "persisted".to_string(),
                message: "still here".to_string(),
                kind: cex_state::NotificationKind::System,
                data: None,
            });
        }

        let state = AppState::try_with_config(config).unwrap();
        assert_eq!(state.notifications.notifications().len(), 1);
    }
}
