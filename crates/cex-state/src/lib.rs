#![deny(missing_docs)]

//! # cex-state — Service State for the CEX Demo Stack
//!
//! The three mutable registries behind the exchange demo — portfolio,
//! staking, notifications — plus the static wallet network catalog and
//! the JSON snapshot vault they persist into.
//!
//! ## Architecture
//!
//! Each service is an explicit injected state object, not a global
//! singleton: an `Arc<parking_lot::RwLock<_>>` around the collections, a
//! `tokio::sync::broadcast` channel for subscriber feeds, and an optional
//! [`JsonVault`] for persistence. Services are cheaply cloneable handles;
//! clones share state.
//!
//! ## Mutation Protocol
//!
//! Every mutation takes the write lock for its full duration, persists
//! the affected collections wholesale to the vault, then broadcasts a
//! snapshot event. Locks are never held across `.await` points (all
//! operations are synchronous). Vault write failures are logged and do
//! not fail the mutation — persisted state is a best-effort mirror, not
//! a transaction log.

pub mod notify;
pub mod portfolio;
pub mod staking;
pub mod vault;
pub mod wallet;

pub use notify::{
    AlertCondition, NewNotification, NewPriceAlert, Notification, NotificationEvent,
    NotificationKind, NotificationService, NotifyError, PriceAlert, PriceAlertUpdate,
};
pub use portfolio::{
    MarketTick, NewTrade, NewWatchlistItem, PortfolioAsset, PortfolioError, PortfolioEvent,
    PortfolioService, PortfolioSummary, TradeRecord, TradeStatus, WatchlistItem,
};
pub use staking::{
    PoolKind, PositionStatus, RewardKind, StakingError, StakingEvent, StakingPool,
    StakingPosition, StakingReward, StakingService,
};
pub use vault::JsonVault;
pub use wallet::{deposit_info, network_config, DepositInfo, NetworkConfig};
