//! # Staking Service
//!
//! Pool catalog, user positions, and reward history for the demo staking
//! product. The pool catalog is injected at construction; stake/unstake
//! operations enforce pool minimums and capacity, and reward accrual is
//! simple daily interest against each active position.
//!
//! Early exit from a fixed-term position is allowed — the penalty is only
//! logged, matching the demo's forgiving semantics.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use cex_core::market::validate_amount;
use cex_core::{AssetSymbol, StorageError, Timestamp, ValidationError};

use crate::vault::JsonVault;

/// Broadcast channel capacity for subscriber feeds.
const EVENT_CAPACITY: usize = 32;

/// Vault keys for the persisted collections.
const KEY_POOLS: &str = "staking_pools";
const KEY_POSITIONS: &str = "staking_positions";
const KEY_REWARDS: &str = "staking_rewards";

/// Demo conversion price used to value claimed rewards in USD.
const REWARD_VALUATION_PRICE: f64 = 2_500.0;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Lock-up flavor of a staking pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolKind {
    /// Locked for the pool's lock period.
    Fixed,
    /// Withdrawable at any time.
    Flexible,
}

/// A staking pool in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPool {
    /// Pool identifier.
    pub id: Uuid,
    /// Staked asset.
    pub asset: AssetSymbol,
    /// Annual percentage yield.
    pub apy: f64,
    /// Fixed or flexible lock-up.
    pub kind: PoolKind,
    /// Minimum stake per operation.
    pub min_amount: f64,
    /// Maximum total stake the pool accepts.
    pub max_capacity: f64,
    /// Currently staked total.
    pub total_staked: f64,
    /// Lock period in days (fixed pools).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_period_days: Option<u32>,
    /// Whether the pool accepts new stakes.
    pub is_active: bool,
}

/// Lifecycle status of a staking position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    /// Earning rewards.
    Active,
    /// Awaiting activation.
    Pending,
    /// Fully unstaked.
    Completed,
    /// Unstake in progress.
    Unstaking,
}

/// A user's stake in one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPosition {
    /// Position identifier.
    pub id: Uuid,
    /// The pool staked into.
    pub pool_id: Uuid,
    /// Staked asset.
    pub asset: AssetSymbol,
    /// Staked quantity.
    pub amount: f64,
    /// APY locked at stake time.
    pub apy: f64,
    /// Pool kind at stake time.
    pub kind: PoolKind,
    /// Lifecycle status.
    pub status: PositionStatus,
    /// When the stake was placed.
    pub start_date: Timestamp,
    /// Lock expiry (fixed-term stakes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    /// Accrued, unclaimed rewards.
    pub pending_rewards: f64,
    /// Lifetime claimed rewards.
    pub total_rewards: f64,
}

/// Classification of a reward record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Routine daily accrual claim.
    Daily,
    /// Compounded back into the position.
    Compound,
    /// Final payout on position close.
    Final,
}

/// A claimed reward, newest first in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingReward {
    /// Reward identifier.
    pub id: Uuid,
    /// The position the reward came from.
    pub position_id: Uuid,
    /// Rewarded asset.
    pub asset: AssetSymbol,
    /// Reward quantity.
    pub amount: f64,
    /// USD valuation at claim time.
    pub value: f64,
    /// Claim time.
    pub timestamp: Timestamp,
    /// Reward classification.
    pub kind: RewardKind,
}

/// Snapshot events broadcast to subscribers after mutations.
#[derive(Debug, Clone)]
pub enum StakingEvent {
    /// Pool catalog changed.
    PoolsChanged(Vec<StakingPool>),
    /// Positions changed.
    PositionsChanged(Vec<StakingPosition>),
    /// Reward history changed.
    RewardsChanged(Vec<StakingReward>),
}

/// Staking operation failures.
#[derive(Debug, thiserror::Error)]
pub enum StakingError {
    /// Input failed primitive validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No pool with the given identifier.
    #[error("pool {0} not found")]
    PoolNotFound(Uuid),

    /// The pool is closed to new stakes.
    #[error("pool {0} is not active")]
    PoolInactive(Uuid),

    /// Stake below the pool minimum.
    #[error("minimum stake amount is {min} {asset}")]
    BelowMinimum {
        /// The pool minimum.
        min: f64,
        /// The pool's asset.
        asset: AssetSymbol,
    },

    /// Stake would exceed pool capacity.
    #[error("pool capacity exceeded")]
    CapacityExceeded,

    /// No position with the given identifier.
    #[error("position {0} not found")]
    PositionNotFound(Uuid),

    /// Unstake larger than the staked amount.
    #[error("insufficient staked amount: staked {staked}, requested {requested}")]
    InsufficientStake {
        /// Currently staked quantity.
        staked: f64,
        /// Requested unstake quantity.
        requested: f64,
    },

    /// Nothing to claim.
    #[error("no rewards to claim for position {0}")]
    NoRewards(Uuid),
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Mutable collections behind the service handle.
#[derive(Debug, Default)]
struct StakingState {
    pools: Vec<StakingPool>,
    positions: Vec<StakingPosition>,
    rewards: Vec<StakingReward>,
}

/// The staking registry. Cheaply cloneable; clones share state.
#[derive(Debug, Clone)]
pub struct StakingService {
    state: Arc<RwLock<StakingState>>,
    vault: Option<JsonVault>,
    events: broadcast::Sender<StakingEvent>,
}

impl StakingService {
    /// Create a service with the given pool catalog, hydrating positions
    /// and rewards from the vault when one is provided.
    ///
    /// A persisted pool catalog takes precedence over `catalog` so that
    /// staked totals survive restarts; `catalog` seeds the first run.
    pub fn new(
        catalog: Vec<StakingPool>,
        vault: Option<JsonVault>,
    ) -> Result<Self, StorageError> {
        let state = match &vault {
            Some(vault) => {
                let persisted: Vec<StakingPool> = vault.load(KEY_POOLS)?;
                StakingState {
                    pools: if persisted.is_empty() { catalog } else { persisted },
                    positions: vault.load(KEY_POSITIONS)?,
                    rewards: vault.load(KEY_REWARDS)?,
                }
            }
            None => StakingState {
                pools: catalog,
                ..StakingState::default()
            },
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            vault,
            events,
        })
    }

    /// Subscribe to staking events.
    pub fn subscribe(&self) -> broadcast::Receiver<StakingEvent> {
        self.events.subscribe()
    }

    /// The pool catalog.
    pub fn pools(&self) -> Vec<StakingPool> {
        self.state.read().pools.clone()
    }

    /// All positions, open and closed.
    pub fn positions(&self) -> Vec<StakingPosition> {
        self.state.read().positions.clone()
    }

    /// Reward history, newest first.
    pub fn rewards(&self) -> Vec<StakingReward> {
        self.state.read().rewards.clone()
    }

    /// Stake into a pool, creating a new active position.
    pub fn stake(
        &self,
        pool_id: Uuid,
        amount: f64,
        duration_days: Option<u32>,
    ) -> Result<StakingPosition, StakingError> {
        let amount = validate_amount(amount)?;
        let mut state = self.state.write();

        let pool = state
            .pools
            .iter_mut()
            .find(|p| p.id == pool_id)
            .ok_or(StakingError::PoolNotFound(pool_id))?;

        if !pool.is_active {
            return Err(StakingError::PoolInactive(pool_id));
        }
        if amount < pool.min_amount {
            return Err(StakingError::BelowMinimum {
                min: pool.min_amount,
                asset: pool.asset.clone(),
            });
        }
        if pool.total_staked + amount > pool.max_capacity {
            return Err(StakingError::CapacityExceeded);
        }

        let now = Timestamp::now();
        let end_date = duration_days.map(|days| {
            Timestamp::from_datetime(*now.as_datetime() + Duration::days(i64::from(days)))
        });

        let position = StakingPosition {
            id: Uuid::new_v4(),
            pool_id,
            asset: pool.asset.clone(),
            amount,
            apy: pool.apy,
            kind: pool.kind,
            status: PositionStatus::Active,
            start_date: now,
            end_date,
            pending_rewards: 0.0,
            total_rewards: 0.0,
        };

        pool.total_staked += amount;
        state.positions.push(position.clone());

        self.persist_pools(&state);
        self.persist_positions(&state);
        self.notify_pools(&state);
        self.notify_positions(&state);
        Ok(position)
    }

    /// Unstake part or all of a position.
    ///
    /// An early exit from a fixed-term position logs a penalty warning but
    /// proceeds. Unstaking the full amount completes and removes the
    /// position.
    pub fn unstake(&self, position_id: Uuid, amount: f64) -> Result<(), StakingError> {
        let amount = validate_amount(amount)?;
        let mut state = self.state.write();

        let idx = state
            .positions
            .iter()
            .position(|p| p.id == position_id)
            .ok_or(StakingError::PositionNotFound(position_id))?;

        let position = &mut state.positions[idx];
        if amount > position.amount {
            return Err(StakingError::InsufficientStake {
                staked: position.amount,
                requested: amount,
            });
        }

        if position.kind == PoolKind::Fixed {
            if let Some(end) = &position.end_date {
                if *end > Timestamp::now() {
                    tracing::warn!(
                        position_id = %position_id,
                        lock_expires = %end,
                        "early unstake from fixed-term position, penalty applies"
                    );
                }
            }
        }

        position.amount -= amount;
        let emptied = position.amount <= 0.0;
        position.status = if emptied {
            PositionStatus::Completed
        } else {
            PositionStatus::Active
        };
        let pool_id = position.pool_id;

        if emptied {
            state.positions.remove(idx);
        }

        if let Some(pool) = state.pools.iter_mut().find(|p| p.id == pool_id) {
            pool.total_staked -= amount;
        }

        self.persist_pools(&state);
        self.persist_positions(&state);
        self.notify_pools(&state);
        self.notify_positions(&state);
        Ok(())
    }

    /// Claim the pending rewards of a position.
    pub fn claim_rewards(&self, position_id: Uuid) -> Result<StakingReward, StakingError> {
        let mut state = self.state.write();

        let position = state
            .positions
            .iter_mut()
            .find(|p| p.id == position_id)
            .ok_or(StakingError::PositionNotFound(position_id))?;

        if position.pending_rewards <= 0.0 {
            return Err(StakingError::NoRewards(position_id));
        }

        let claimed = position.pending_rewards;
        let reward = StakingReward {
            id: Uuid::new_v4(),
            position_id,
            asset: position.asset.clone(),
            amount: claimed,
            value: claimed * REWARD_VALUATION_PRICE,
            timestamp: Timestamp::now(),
            kind: RewardKind::Daily,
        };

        position.total_rewards += claimed;
        position.pending_rewards = 0.0;
        state.rewards.insert(0, reward.clone());

        self.persist_positions(&state);
        self.persist_rewards(&state);
        self.notify_positions(&state);
        self.notify_rewards(&state);
        Ok(reward)
    }

    /// Accrue one day of simple interest on every active position.
    ///
    /// `daily = amount * apy / 100 / 365`, added to pending rewards.
    /// Intended to be driven by an external scheduler tick.
    pub fn accrue_daily(&self) {
        let mut state = self.state.write();
        for position in &mut state.positions {
            if position.status == PositionStatus::Active {
                position.pending_rewards += position.amount * position.apy / 100.0 / 365.0;
            }
        }
        self.persist_positions(&state);
        self.notify_positions(&state);
    }

    // -- Internals -----------------------------------------------------------

    fn persist_pools(&self, state: &StakingState) {
        self.persist(KEY_POOLS, &state.pools);
    }

    fn persist_positions(&self, state: &StakingState) {
        self.persist(KEY_POSITIONS, &state.positions);
    }

    fn persist_rewards(&self, state: &StakingState) {
        self.persist(KEY_REWARDS, &state.rewards);
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(vault) = &self.vault {
            if let Err(e) = vault.save(key, value) {
                tracing::warn!(error = %e, key, "failed to persist staking snapshot");
            }
        }
    }

    fn notify_pools(&self, state: &StakingState) {
        let _ = self
            .events
            .send(StakingEvent::PoolsChanged(state.pools.clone()));
    }

    fn notify_positions(&self, state: &StakingState) {
        let _ = self
            .events
            .send(StakingEvent::PositionsChanged(state.positions.clone()));
    }

    fn notify_rewards(&self, state: &StakingState) {
        let _ = self
            .events
            .send(StakingEvent::RewardsChanged(state.rewards.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    fn eth_pool() -> StakingPool {
        StakingPool {
            id: Uuid::new_v4(),
            asset: symbol("ETH"),
            apy: 5.2,
            kind: PoolKind::Flexible,
            min_amount: 0.1,
            max_capacity: 10_000.0,
            total_staked: 7_500.0,
            lock_period_days: None,
            is_active: true,
        }
    }

    fn btc_pool() -> StakingPool {
        StakingPool {
            id: Uuid::new_v4(),
            asset: symbol("BTC"),
            apy: 4.8,
            kind: PoolKind::Fixed,
            min_amount: 0.01,
            max_capacity: 500.0,
            total_staked: 350.0,
            lock_period_days: Some(90),
            is_active: true,
        }
    }

    fn service_with(pools: Vec<StakingPool>) -> StakingService {
        StakingService::new(pools, None).unwrap()
    }

    #[test]
    fn catalog_is_visible() {
        let svc = service_with(vec![eth_pool(), btc_pool()]);
        assert_eq!(svc.pools().len(), 2);
        assert!(svc.positions().is_empty());
        assert!(svc.rewards().is_empty());
    }

    #[test]
    fn stake_creates_position_and_bumps_pool() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);

        let position = svc.stake(pool_id, 2.5, None).unwrap();
        assert_eq!(position.asset, "ETH");
        assert_eq!(position.amount, 2.5);
        assert_eq!(position.status, PositionStatus::Active);
        assert!(position.end_date.is_none());

        assert_eq!(svc.pools()[0].total_staked, 7_502.5);
        assert_eq!(svc.positions().len(), 1);
    }

    #[test]
    fn stake_with_duration_sets_end_date() {
        let pool = btc_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);

        let position = svc.stake(pool_id, 1.0, Some(90)).unwrap();
        let end = position.end_date.expect("end date");
        assert!(end > position.start_date);
    }

    #[test]
    fn stake_unknown_pool_fails() {
        let svc = service_with(vec![eth_pool()]);
        let err = svc.stake(Uuid::new_v4(), 1.0, None).unwrap_err();
        assert!(matches!(err, StakingError::PoolNotFound(_)));
    }

    #[test]
    fn stake_below_minimum_fails() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let err = svc.stake(pool_id, 0.05, None).unwrap_err();
        assert!(matches!(err, StakingError::BelowMinimum { .. }));
    }

    #[test]
    fn stake_beyond_capacity_fails() {
        let pool = eth_pool(); // 7500 staked of 10000 cap
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let err = svc.stake(pool_id, 3_000.0, None).unwrap_err();
        assert!(matches!(err, StakingError::CapacityExceeded));
        // Pool untouched after the rejection.
        assert_eq!(svc.pools()[0].total_staked, 7_500.0);
    }

    #[test]
    fn stake_into_inactive_pool_fails() {
        let mut pool = eth_pool();
        pool.is_active = false;
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let err = svc.stake(pool_id, 1.0, None).unwrap_err();
        assert!(matches!(err, StakingError::PoolInactive(_)));
    }

    #[test]
    fn partial_unstake_keeps_position_active() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 2.0, None).unwrap();

        svc.unstake(position.id, 0.5).unwrap();

        let positions = svc.positions();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].amount, 1.5);
        assert_eq!(positions[0].status, PositionStatus::Active);
        assert_eq!(svc.pools()[0].total_staked, 7_501.5);
    }

    #[test]
    fn full_unstake_removes_position() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 2.0, None).unwrap();

        svc.unstake(position.id, 2.0).unwrap();
        assert!(svc.positions().is_empty());
        assert_eq!(svc.pools()[0].total_staked, 7_500.0);
    }

    #[test]
    fn unstake_more_than_staked_fails() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 1.0, None).unwrap();

        let err = svc.unstake(position.id, 2.0).unwrap_err();
        assert!(matches!(err, StakingError::InsufficientStake { .. }));
        assert_eq!(svc.positions()[0].amount, 1.0);
    }

    #[test]
    fn unstake_unknown_position_fails() {
        let svc = service_with(vec![eth_pool()]);
        let err = svc.unstake(Uuid::new_v4(), 1.0).unwrap_err();
        assert!(matches!(err, StakingError::PositionNotFound(_)));
    }

    #[test]
    fn claim_without_accrual_fails() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 1.0, None).unwrap();

        let err = svc.claim_rewards(position.id).unwrap_err();
        assert!(matches!(err, StakingError::NoRewards(_)));
    }

    #[test]
    fn accrue_then_claim_moves_pending_to_total() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 100.0, None).unwrap();

        svc.accrue_daily();
        let pending = svc.positions()[0].pending_rewards;
        let expected = 100.0 * 5.2 / 100.0 / 365.0;
        assert!((pending - expected).abs() < 1e-12);

        let reward = svc.claim_rewards(position.id).unwrap();
        assert!((reward.amount - expected).abs() < 1e-12);
        assert!((reward.value - expected * REWARD_VALUATION_PRICE).abs() < 1e-9);
        assert_eq!(reward.kind, RewardKind::Daily);

        let after = &svc.positions()[0];
        assert_eq!(after.pending_rewards, 0.0);
        assert!((after.total_rewards - expected).abs() < 1e-12);
        assert_eq!(svc.rewards().len(), 1);
    }

    #[test]
    fn rewards_history_is_newest_first() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let position = svc.stake(pool_id, 100.0, None).unwrap();

        svc.accrue_daily();
        let first = svc.claim_rewards(position.id).unwrap();
        svc.accrue_daily();
        let second = svc.claim_rewards(position.id).unwrap();

        let rewards = svc.rewards();
        assert_eq!(rewards[0].id, second.id);
        assert_eq!(rewards[1].id, first.id);
    }

    #[test]
    fn subscribers_receive_position_events() {
        let pool = eth_pool();
        let pool_id = pool.id;
        let svc = service_with(vec![pool]);
        let mut rx = svc.subscribe();

        svc.stake(pool_id, 1.0, None).unwrap();

        // stake() emits PoolsChanged then PositionsChanged.
        assert!(matches!(
            rx.try_recv().unwrap(),
            StakingEvent::PoolsChanged(_)
        ));
        match rx.try_recv().unwrap() {
            StakingEvent::PositionsChanged(positions) => assert_eq!(positions.len(), 1),
            other => panic!("expected PositionsChanged, got {other:?}"),
        }
    }

    #[test]
    fn positions_survive_restart_through_vault() {
        let tmp = tempfile::tempdir().unwrap();
        let pool = eth_pool();
        let pool_id = pool.id;

        {
            let vault = JsonVault::open(tmp.path()).unwrap();
            let svc = StakingService::new(vec![pool.clone()], Some(vault)).unwrap();
            svc.stake(pool_id, 2.0, None).unwrap();
        }

        let vault = JsonVault::open(tmp.path()).unwrap();
        // The persisted catalog (with updated totals) wins over the seed.
        let svc = StakingService::new(vec![pool], Some(vault)).unwrap();
        assert_eq!(svc.positions().len(), 1);
        assert_eq!(svc.pools()[0].total_staked, 7_502.0);
    }
}
