//! # Portfolio Service
//!
//! Holdings, trade history, and watchlist for the demo exchange account.
//! Average-cost accounting folds executed trades into positions; the
//! summary derives totals, PnL, and allocation percentages on demand.
//!
//! Subscribers receive [`PortfolioEvent`] snapshots after every mutation.
//! The day-change figures are mocked as 10 % of total PnL — the demo has
//! no historical price source to derive them from.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use cex_core::market::validate_amount;
use cex_core::{AssetSymbol, StorageError, Timestamp, TradeSide, ValidationError};

use crate::vault::JsonVault;

/// Broadcast channel capacity for subscriber feeds.
const EVENT_CAPACITY: usize = 32;

/// Mock day-change factor applied to total PnL.
const DAY_CHANGE_FACTOR: f64 = 0.1;

/// Vault keys for the persisted collections.
const KEY_HOLDINGS: &str = "portfolio";
const KEY_TRADES: &str = "trade_history";
const KEY_WATCHLIST: &str = "watchlist";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A held position in one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAsset {
    /// Record identifier.
    pub id: Uuid,
    /// Position symbol (e.g. `BTC/USDT`).
    pub symbol: AssetSymbol,
    /// Display name, derived from the base asset.
    pub name: String,
    /// Quantity held.
    pub amount: f64,
    /// Average acquisition price.
    pub average_price: f64,
    /// Last known market price.
    pub current_price: f64,
    /// `amount * current_price`.
    pub total_value: f64,
    /// Unrealized profit and loss.
    pub pnl: f64,
    /// PnL as a percentage of cost basis.
    pub pnl_percentage: f64,
    /// Share of total portfolio value; derived in [`PortfolioService::summary`].
    pub allocation: f64,
    /// Last mutation time.
    pub last_updated: Timestamp,
}

/// Derived portfolio totals plus the per-asset breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of position values.
    pub total_value: f64,
    /// Sum of position PnL.
    pub total_pnl: f64,
    /// PnL as a percentage of cost basis.
    pub total_pnl_percentage: f64,
    /// Mock day change (10 % of PnL).
    pub day_change: f64,
    /// Mock day change percentage.
    pub day_change_percentage: f64,
    /// Positions with allocation percentages filled in.
    pub assets: Vec<PortfolioAsset>,
}

/// Execution status of a recorded trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    /// Trade settled.
    Completed,
    /// Trade awaiting settlement.
    Pending,
    /// Trade cancelled before settlement.
    Cancelled,
}

/// An executed trade, newest first in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Traded symbol.
    pub symbol: AssetSymbol,
    /// Buy or sell.
    pub side: TradeSide,
    /// Quantity traded.
    pub amount: f64,
    /// Execution price.
    pub price: f64,
    /// `amount * price`.
    pub total: f64,
    /// Exchange fee charged.
    pub fee: f64,
    /// Execution time.
    pub timestamp: Timestamp,
    /// Settlement status.
    pub status: TradeStatus,
}

/// Input for recording a trade.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    /// Traded symbol.
    pub symbol: AssetSymbol,
    /// Buy or sell.
    pub side: TradeSide,
    /// Quantity traded.
    pub amount: f64,
    /// Execution price.
    pub price: f64,
    /// Exchange fee charged.
    pub fee: f64,
}

/// A watched market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    /// Record identifier.
    pub id: Uuid,
    /// Watched symbol; unique within the watchlist.
    pub symbol: AssetSymbol,
    /// Display name.
    pub name: String,
    /// Last known price.
    pub current_price: f64,
    /// Absolute 24-hour price change.
    pub change_24h: f64,
    /// Relative 24-hour price change.
    pub change_percentage_24h: f64,
    /// 24-hour traded volume.
    pub volume_24h: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// When the symbol was added.
    pub added_at: Timestamp,
}

/// Input for adding a watchlist entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistItem {
    /// Symbol to watch.
    pub symbol: AssetSymbol,
    /// Display name.
    pub name: String,
    /// Last known price.
    pub current_price: f64,
    /// Absolute 24-hour price change.
    pub change_24h: f64,
    /// Relative 24-hour price change.
    pub change_percentage_24h: f64,
    /// 24-hour traded volume.
    pub volume_24h: f64,
    /// Market capitalization.
    pub market_cap: f64,
}

/// One market data tick, as delivered by the price feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTick {
    /// Ticker symbol.
    pub symbol: AssetSymbol,
    /// Latest price.
    pub price: f64,
    /// Absolute 24-hour change.
    pub change_24h: f64,
    /// 24-hour traded volume.
    pub volume_24h: f64,
}

/// Snapshot events broadcast to subscribers after mutations.
#[derive(Debug, Clone)]
pub enum PortfolioEvent {
    /// Holdings changed; carries the fresh summary.
    SummaryChanged(PortfolioSummary),
    /// Watchlist changed; carries the full list.
    WatchlistChanged(Vec<WatchlistItem>),
}

/// Portfolio operation failures.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    /// Input failed primitive validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No position exists for the symbol.
    #[error("no position in {0}")]
    UnknownAsset(AssetSymbol),

    /// Sell quantity exceeds the held amount.
    #[error("insufficient holdings in {symbol}: held {held}, requested {requested}")]
    InsufficientHoldings {
        /// The position symbol.
        symbol: AssetSymbol,
        /// Quantity currently held.
        held: f64,
        /// Quantity requested to sell.
        requested: f64,
    },

    /// The symbol is already on the watchlist.
    #[error("{0} is already on the watchlist")]
    AlreadyWatched(AssetSymbol),

    /// The symbol is not on the watchlist.
    #[error("{0} is not on the watchlist")]
    NotWatched(AssetSymbol),
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Mutable collections behind the service handle.
#[derive(Debug, Default)]
struct PortfolioState {
    holdings: Vec<PortfolioAsset>,
    trades: Vec<TradeRecord>,
    watchlist: Vec<WatchlistItem>,
}

/// The portfolio registry. Cheaply cloneable; clones share state.
#[derive(Debug, Clone)]
pub struct PortfolioService {
    state: Arc<RwLock<PortfolioState>>,
    vault: Option<JsonVault>,
    events: broadcast::Sender<PortfolioEvent>,
}

impl PortfolioService {
    /// Create a service, hydrating collections from the vault when one is
    /// provided.
    pub fn new(vault: Option<JsonVault>) -> Result<Self, StorageError> {
        let state = match &vault {
            Some(vault) => PortfolioState {
                holdings: vault.load(KEY_HOLDINGS)?,
                trades: vault.load(KEY_TRADES)?,
                watchlist: vault.load(KEY_WATCHLIST)?,
            },
            None => PortfolioState::default(),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            vault,
            events,
        })
    }

    /// Subscribe to portfolio events.
    pub fn subscribe(&self) -> broadcast::Receiver<PortfolioEvent> {
        self.events.subscribe()
    }

    // -- Holdings ------------------------------------------------------------

    /// Derive the portfolio summary from current holdings.
    pub fn summary(&self) -> PortfolioSummary {
        summarize(&self.state.read().holdings)
    }

    /// Update the market price of a held position.
    pub fn update_asset_price(
        &self,
        symbol: &AssetSymbol,
        price: f64,
    ) -> Result<PortfolioAsset, PortfolioError> {
        let price = validate_amount(price)?;
        let mut state = self.state.write();

        let asset = state
            .holdings
            .iter_mut()
            .find(|a| a.symbol == *symbol)
            .ok_or_else(|| PortfolioError::UnknownAsset(symbol.clone()))?;

        asset.current_price = price;
        asset.last_updated = Timestamp::now();
        recompute(asset);
        let updated = asset.clone();

        self.persist_holdings(&state);
        self.notify_summary(&state);
        Ok(updated)
    }

    /// Record an executed trade and fold it into the holdings.
    ///
    /// Buys extend the position at average cost; sells reduce it, and a
    /// sell that empties the position removes it. Selling more than held
    /// or selling an unknown symbol is rejected before any mutation.
    pub fn record_trade(&self, input: NewTrade) -> Result<TradeRecord, PortfolioError> {
        let amount = validate_amount(input.amount)?;
        let price = validate_amount(input.price)?;
        if !input.fee.is_finite() || input.fee < 0.0 {
            return Err(ValidationError::InvalidAmount(input.fee).into());
        }

        let mut state = self.state.write();

        // Reject impossible sells before touching anything.
        if input.side == TradeSide::Sell {
            let held = state
                .holdings
                .iter()
                .find(|a| a.symbol == input.symbol)
                .map(|a| a.amount)
                .ok_or_else(|| PortfolioError::UnknownAsset(input.symbol.clone()))?;
            if amount > held {
                return Err(PortfolioError::InsufficientHoldings {
                    symbol: input.symbol.clone(),
                    held,
                    requested: amount,
                });
            }
        }

        let record = TradeRecord {
            id: Uuid::new_v4(),
            symbol: input.symbol.clone(),
            side: input.side,
            amount,
            price,
            total: amount * price,
            fee: input.fee,
            timestamp: Timestamp::now(),
            status: TradeStatus::Completed,
        };
        state.trades.insert(0, record.clone());

        apply_trade(&mut state.holdings, &record);

        self.persist_holdings(&state);
        self.persist_trades(&state);
        self.notify_summary(&state);
        Ok(record)
    }

    /// Trade history, newest first.
    pub fn trade_history(&self) -> Vec<TradeRecord> {
        self.state.read().trades.clone()
    }

    // -- Watchlist -----------------------------------------------------------

    /// Current watchlist.
    pub fn watchlist(&self) -> Vec<WatchlistItem> {
        self.state.read().watchlist.clone()
    }

    /// Add a symbol to the watchlist. Symbols are unique.
    pub fn add_to_watchlist(&self, input: NewWatchlistItem) -> Result<WatchlistItem, PortfolioError> {
        let mut state = self.state.write();
        if state.watchlist.iter().any(|w| w.symbol == input.symbol) {
            return Err(PortfolioError::AlreadyWatched(input.symbol));
        }

        let item = WatchlistItem {
            id: Uuid::new_v4(),
            symbol: input.symbol,
            name: input.name,
            current_price: input.current_price,
            change_24h: input.change_24h,
            change_percentage_24h: input.change_percentage_24h,
            volume_24h: input.volume_24h,
            market_cap: input.market_cap,
            added_at: Timestamp::now(),
        };
        state.watchlist.push(item.clone());

        self.persist_watchlist(&state);
        self.notify_watchlist(&state);
        Ok(item)
    }

    /// Remove a symbol from the watchlist.
    pub fn remove_from_watchlist(&self, symbol: &AssetSymbol) -> Result<(), PortfolioError> {
        let mut state = self.state.write();
        let before = state.watchlist.len();
        state.watchlist.retain(|w| w.symbol != *symbol);
        if state.watchlist.len() == before {
            return Err(PortfolioError::NotWatched(symbol.clone()));
        }

        self.persist_watchlist(&state);
        self.notify_watchlist(&state);
        Ok(())
    }

    /// Refresh watchlist entries from market ticks. Symbols without a
    /// matching tick are left untouched.
    pub fn update_watchlist_prices(&self, ticks: &[MarketTick]) {
        let mut state = self.state.write();
        for item in &mut state.watchlist {
            let Some(tick) = ticks.iter().find(|t| t.symbol == item.symbol) else {
                continue;
            };
            item.current_price = tick.price;
            item.change_24h = tick.change_24h;
            item.volume_24h = tick.volume_24h;
            let prior = tick.price - tick.change_24h;
            item.change_percentage_24h = if prior != 0.0 {
                (tick.change_24h / prior) * 100.0
            } else {
                0.0
            };
        }

        self.persist_watchlist(&state);
        self.notify_watchlist(&state);
    }

    // -- Internals -----------------------------------------------------------

    fn persist_holdings(&self, state: &PortfolioState) {
        self.persist(KEY_HOLDINGS, &state.holdings);
    }

    fn persist_trades(&self, state: &PortfolioState) {
        self.persist(KEY_TRADES, &state.trades);
    }

    fn persist_watchlist(&self, state: &PortfolioState) {
        self.persist(KEY_WATCHLIST, &state.watchlist);
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(vault) = &self.vault {
            if let Err(e) = vault.save(key, value) {
                tracing::warn!(error = %e, key, "failed to persist portfolio snapshot");
            }
        }
    }

    fn notify_summary(&self, state: &PortfolioState) {
        let _ = self
            .events
            .send(PortfolioEvent::SummaryChanged(summarize(&state.holdings)));
    }

    fn notify_watchlist(&self, state: &PortfolioState) {
        let _ = self
            .events
            .send(PortfolioEvent::WatchlistChanged(state.watchlist.clone()));
    }
}

/// Recompute the derived fields of a position after a mutation.
fn recompute(asset: &mut PortfolioAsset) {
    asset.total_value = asset.amount * asset.current_price;
    let cost_basis = asset.amount * asset.average_price;
    asset.pnl = asset.total_value - cost_basis;
    asset.pnl_percentage = if cost_basis > 0.0 {
        (asset.pnl / cost_basis) * 100.0
    } else {
        0.0
    };
}

/// Fold a completed trade into the holdings.
fn apply_trade(holdings: &mut Vec<PortfolioAsset>, trade: &TradeRecord) {
    let idx = holdings.iter().position(|a| a.symbol == trade.symbol);

    let idx = match (idx, trade.side) {
        (Some(idx), _) => idx,
        (None, TradeSide::Buy) => {
            holdings.push(PortfolioAsset {
                id: Uuid::new_v4(),
                symbol: trade.symbol.clone(),
                name: trade.symbol.base().to_string(),
                amount: 0.0,
                average_price: 0.0,
                current_price: trade.price,
                total_value: 0.0,
                pnl: 0.0,
                pnl_percentage: 0.0,
                allocation: 0.0,
                last_updated: trade.timestamp,
            });
            holdings.len() - 1
        }
        // record_trade rejects sells without a position.
        (None, TradeSide::Sell) => return,
    };

    let asset = &mut holdings[idx];
    match trade.side {
        TradeSide::Buy => {
            let total_cost = asset.amount * asset.average_price + trade.amount * trade.price;
            asset.amount += trade.amount;
            asset.average_price = if asset.amount > 0.0 {
                total_cost / asset.amount
            } else {
                trade.price
            };
        }
        TradeSide::Sell => {
            asset.amount -= trade.amount;
            if asset.amount <= 0.0 {
                holdings.remove(idx);
                return;
            }
        }
    }

    let asset = &mut holdings[idx];
    asset.current_price = trade.price;
    asset.last_updated = trade.timestamp;
    recompute(asset);
}

/// Derive summary totals and allocation percentages.
fn summarize(holdings: &[PortfolioAsset]) -> PortfolioSummary {
    let total_value: f64 = holdings.iter().map(|a| a.total_value).sum();
    let total_pnl: f64 = holdings.iter().map(|a| a.pnl).sum();
    let cost_basis = total_value - total_pnl;
    let total_pnl_percentage = if total_value > 0.0 && cost_basis != 0.0 {
        (total_pnl / cost_basis) * 100.0
    } else {
        0.0
    };

    let assets = holdings
        .iter()
        .cloned()
        .map(|mut a| {
            a.allocation = if total_value > 0.0 {
                (a.total_value / total_value) * 100.0
            } else {
                0.0
            };
            a
        })
        .collect();

    PortfolioSummary {
        total_value,
        total_pnl,
        total_pnl_percentage,
        day_change: total_pnl * DAY_CHANGE_FACTOR,
        day_change_percentage: total_pnl_percentage * DAY_CHANGE_FACTOR,
        assets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    fn service() -> PortfolioService {
        PortfolioService::new(None).unwrap()
    }

    fn buy(sym: &str, amount: f64, price: f64) -> NewTrade {
        NewTrade {
            symbol: symbol(sym),
            side: TradeSide::Buy,
            amount,
            price,
            fee: 0.0,
        }
    }

    fn sell(sym: &str, amount: f64, price: f64) -> NewTrade {
        NewTrade {
            symbol: symbol(sym),
            side: TradeSide::Sell,
            amount,
            price,
            fee: 0.0,
        }
    }

    #[test]
    fn empty_portfolio_summary_is_zeroed() {
        let s = service().summary();
        assert_eq!(s.total_value, 0.0);
        assert_eq!(s.total_pnl, 0.0);
        assert!(s.assets.is_empty());
    }

    #[test]
    fn buy_creates_position_at_cost() {
        let svc = service();
        svc.record_trade(buy("BTC/USDT", 0.5, 40_000.0)).unwrap();

        let summary = svc.summary();
        assert_eq!(summary.assets.len(), 1);
        let asset = &summary.assets[0];
        assert_eq!(asset.symbol, "BTC/USDT");
        assert_eq!(asset.name, "BTC");
        assert_eq!(asset.amount, 0.5);
        assert_eq!(asset.average_price, 40_000.0);
        assert_eq!(asset.total_value, 20_000.0);
        assert_eq!(asset.pnl, 0.0);
        assert_eq!(asset.allocation, 100.0);
    }

    #[test]
    fn repeated_buys_average_the_cost() {
        let svc = service();
        svc.record_trade(buy("ETH/USDT", 1.0, 2_000.0)).unwrap();
        svc.record_trade(buy("ETH/USDT", 1.0, 3_000.0)).unwrap();

        let asset = &svc.summary().assets[0];
        assert_eq!(asset.amount, 2.0);
        assert_eq!(asset.average_price, 2_500.0);
    }

    #[test]
    fn sell_reduces_position() {
        let svc = service();
        svc.record_trade(buy("ETH/USDT", 2.0, 2_000.0)).unwrap();
        svc.record_trade(sell("ETH/USDT", 0.5, 2_500.0)).unwrap();

        let asset = &svc.summary().assets[0];
        assert_eq!(asset.amount, 1.5);
        // Average price is untouched by sells.
        assert_eq!(asset.average_price, 2_000.0);
        assert_eq!(asset.current_price, 2_500.0);
    }

    #[test]
    fn selling_entire_position_removes_it() {
        let svc = service();
        svc.record_trade(buy("ETH/USDT", 2.0, 2_000.0)).unwrap();
        svc.record_trade(sell("ETH/USDT", 2.0, 2_500.0)).unwrap();
        assert!(svc.summary().assets.is_empty());
    }

    #[test]
    fn overselling_is_rejected() {
        let svc = service();
        svc.record_trade(buy("ETH/USDT", 1.0, 2_000.0)).unwrap();
        let err = svc.record_trade(sell("ETH/USDT", 2.0, 2_500.0)).unwrap_err();
        assert!(matches!(err, PortfolioError::InsufficientHoldings { .. }));
        // Nothing was mutated.
        assert_eq!(svc.summary().assets[0].amount, 1.0);
        assert_eq!(svc.trade_history().len(), 1);
    }

    #[test]
    fn selling_unknown_symbol_is_rejected() {
        let err = service().record_trade(sell("BTC/USDT", 1.0, 100.0)).unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownAsset(_)));
    }

    #[test]
    fn trade_history_is_newest_first() {
        let svc = service();
        svc.record_trade(buy("BTC/USDT", 1.0, 100.0)).unwrap();
        svc.record_trade(buy("ETH/USDT", 1.0, 200.0)).unwrap();

        let history = svc.trade_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].symbol, "ETH/USDT");
        assert_eq!(history[1].symbol, "BTC/USDT");
    }

    #[test]
    fn trade_rejects_nonpositive_amounts() {
        let svc = service();
        assert!(svc.record_trade(buy("BTC/USDT", 0.0, 100.0)).is_err());
        assert!(svc.record_trade(buy("BTC/USDT", 1.0, -5.0)).is_err());
        let mut t = buy("BTC/USDT", 1.0, 100.0);
        t.fee = -1.0;
        assert!(svc.record_trade(t).is_err());
    }

    #[test]
    fn update_asset_price_recomputes_pnl() {
        let svc = service();
        svc.record_trade(buy("BTC/USDT", 1.0, 40_000.0)).unwrap();
        let asset = svc
            .update_asset_price(&symbol("BTC/USDT"), 44_000.0)
            .unwrap();
        assert_eq!(asset.total_value, 44_000.0);
        assert_eq!(asset.pnl, 4_000.0);
        assert!((asset.pnl_percentage - 10.0).abs() < 1e-9);
    }

    #[test]
    fn update_price_of_unknown_asset_fails() {
        let err = service()
            .update_asset_price(&symbol("DOGE/USDT"), 1.0)
            .unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownAsset(_)));
    }

    #[test]
    fn allocations_sum_to_one_hundred() {
        let svc = service();
        svc.record_trade(buy("BTC/USDT", 1.0, 30_000.0)).unwrap();
        svc.record_trade(buy("ETH/USDT", 5.0, 2_000.0)).unwrap();

        let summary = svc.summary();
        let total: f64 = summary.assets.iter().map(|a| a.allocation).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(summary.total_value, 40_000.0);
    }

    #[test]
    fn day_change_is_ten_percent_of_pnl() {
        let svc = service();
        svc.record_trade(buy("BTC/USDT", 1.0, 40_000.0)).unwrap();
        svc.update_asset_price(&symbol("BTC/USDT"), 44_000.0)
            .unwrap();
        let summary = svc.summary();
        assert!((summary.day_change - 400.0).abs() < 1e-9);
    }

    #[test]
    fn watchlist_add_remove() {
        let svc = service();
        let item = svc
            .add_to_watchlist(NewWatchlistItem {
                symbol: symbol("SOL/USDT"),
                name: "Solana".to_string(),
                current_price: 98.5,
                change_24h: 5.12,
                change_percentage_24h: 5.48,
                volume_24h: 320_000_000.0,
                market_cap: 42_000_000_000.0,
            })
            .unwrap();
        assert_eq!(item.symbol, "SOL/USDT");
        assert_eq!(svc.watchlist().len(), 1);

        svc.remove_from_watchlist(&symbol("SOL/USDT")).unwrap();
        assert!(svc.watchlist().is_empty());
    }

    #[test]
    fn watchlist_rejects_duplicates() {
        let svc = service();
        let entry = NewWatchlistItem {
            symbol: symbol("SOL/USDT"),
            name: "Solana".to_string(),
            current_price: 98.5,
            change_24h: 0.0,
            change_percentage_24h: 0.0,
            volume_24h: 0.0,
            market_cap: 0.0,
        };
        svc.add_to_watchlist(entry.clone()).unwrap();
        let err = svc.add_to_watchlist(entry).unwrap_err();
        assert!(matches!(err, PortfolioError::AlreadyWatched(_)));
    }

    #[test]
    fn removing_unwatched_symbol_fails() {
        let err = service()
            .remove_from_watchlist(&symbol("XRP/USDT"))
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotWatched(_)));
    }

    #[test]
    fn watchlist_price_refresh_updates_matching_symbols() {
        let svc = service();
        svc.add_to_watchlist(NewWatchlistItem {
            symbol: symbol("SOL/USDT"),
            name: "Solana".to_string(),
            current_price: 90.0,
            change_24h: 0.0,
            change_percentage_24h: 0.0,
            volume_24h: 0.0,
            market_cap: 0.0,
        })
        .unwrap();

        svc.update_watchlist_prices(&[MarketTick {
            symbol: symbol("SOL/USDT"),
            price: 110.0,
            change_24h: 10.0,
            volume_24h: 1_000.0,
        }]);

        let item = &svc.watchlist()[0];
        assert_eq!(item.current_price, 110.0);
        assert_eq!(item.volume_24h, 1_000.0);
        assert!((item.change_percentage_24h - 10.0).abs() < 1e-9);
    }

    #[test]
    fn subscribers_receive_summary_events() {
        let svc = service();
        let mut rx = svc.subscribe();
        svc.record_trade(buy("BTC/USDT", 1.0, 100.0)).unwrap();

        match rx.try_recv().unwrap() {
            PortfolioEvent::SummaryChanged(summary) => {
                assert_eq!(summary.assets.len(), 1);
            }
            other => panic!("expected SummaryChanged, got {other:?}"),
        }
    }

    #[test]
    fn persistence_roundtrip_through_vault() {
        let tmp = tempfile::tempdir().unwrap();

        {
            let vault = JsonVault::open(tmp.path()).unwrap();
            let svc = PortfolioService::new(Some(vault)).unwrap();
            svc.record_trade(buy("BTC/USDT", 0.25, 50_000.0)).unwrap();
        }

        let vault = JsonVault::open(tmp.path()).unwrap();
        let svc = PortfolioService::new(Some(vault)).unwrap();
        let summary = svc.summary();
        assert_eq!(summary.assets.len(), 1);
        assert_eq!(summary.assets[0].amount, 0.25);
        assert_eq!(svc.trade_history().len(), 1);
    }
}
