//! # Notification Service
//!
//! User-facing notification feed plus price alerts. Notifications are
//! newest-first with read tracking; alerts fire once against incoming
//! market ticks and deactivate themselves after triggering.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use cex_core::market::validate_amount;
use cex_core::{AssetSymbol, StorageError, Timestamp, ValidationError};

use crate::portfolio::MarketTick;
use crate::vault::JsonVault;

/// Broadcast channel capacity for subscriber feeds.
const EVENT_CAPACITY: usize = 32;

/// Vault keys for the persisted collections.
const KEY_NOTIFICATIONS: &str = "notifications";
const KEY_ALERTS: &str = "price_alerts";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Classification of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A price alert fired.
    PriceAlert,
    /// A trade settled.
    TradeExecuted,
    /// A deposit arrived.
    Deposit,
    /// A withdrawal settled.
    Withdrawal,
    /// Platform announcement.
    System,
    /// Security-relevant event.
    Security,
}

/// A delivered notification, newest first in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Record identifier.
    pub id: Uuid,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Classification.
    pub kind: NotificationKind,
    /// Delivery time.
    pub timestamp: Timestamp,
    /// Whether the user has seen it.
    pub read: bool,
    /// Optional structured payload for the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Input for pushing a notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Classification.
    pub kind: NotificationKind,
    /// Optional structured payload.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Direction of a price alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCondition {
    /// Fire when price rises to or above the target.
    Above,
    /// Fire when price falls to or below the target.
    Below,
}

/// A standing price alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    /// Record identifier.
    pub id: Uuid,
    /// Watched symbol.
    pub symbol: AssetSymbol,
    /// Fire direction.
    pub condition: AlertCondition,
    /// Trigger threshold.
    pub target_price: f64,
    /// Price at creation or last update.
    pub current_price: f64,
    /// Whether the alert is armed. Cleared after firing.
    pub active: bool,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Input for creating a price alert.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceAlert {
    /// Watched symbol.
    pub symbol: AssetSymbol,
    /// Fire direction.
    pub condition: AlertCondition,
    /// Trigger threshold.
    pub target_price: f64,
    /// Price at creation time.
    pub current_price: f64,
}

/// Partial update for a standing alert; absent fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlertUpdate {
    /// New fire direction.
    #[serde(default)]
    pub condition: Option<AlertCondition>,
    /// New trigger threshold.
    #[serde(default)]
    pub target_price: Option<f64>,
    /// Arm or disarm.
    #[serde(default)]
    pub active: Option<bool>,
}

/// Snapshot events broadcast to subscribers after mutations.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    /// The notification feed changed.
    NotificationsChanged(Vec<Notification>),
    /// The alert list changed.
    AlertsChanged(Vec<PriceAlert>),
}

/// Notification operation failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Input failed primitive validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No notification with the given identifier.
    #[error("notification {0} not found")]
    NotificationNotFound(Uuid),

    /// No alert with the given identifier.
    #[error("alert {0} not found")]
    AlertNotFound(Uuid),
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Mutable collections behind the service handle.
#[derive(Debug, Default)]
struct NotifyState {
    notifications: Vec<Notification>,
    alerts: Vec<PriceAlert>,
}

/// The notification registry. Cheaply cloneable; clones share state.
#[derive(Debug, Clone)]
pub struct NotificationService {
    state: Arc<RwLock<NotifyState>>,
    vault: Option<JsonVault>,
    events: broadcast::Sender<NotificationEvent>,
}

impl NotificationService {
    /// Create a service, hydrating collections from the vault when one is
    /// provided.
    pub fn new(vault: Option<JsonVault>) -> Result<Self, StorageError> {
        let state = match &vault {
            Some(vault) => NotifyState {
                notifications: vault.load(KEY_NOTIFICATIONS)?,
                alerts: vault.load(KEY_ALERTS)?,
            },
            None => NotifyState::default(),
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            vault,
            events,
        })
    }

    /// Subscribe to notification events.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    // -- Notifications -------------------------------------------------------

    /// Push a notification onto the feed (newest first, unread).
    pub fn push(&self, input: NewNotification) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            title: input.title,
            message: input.message,
            kind: input.kind,
            timestamp: Timestamp::now(),
            read: false,
            data: input.data,
        };

        let mut state = self.state.write();
        state.notifications.insert(0, notification.clone());
        self.persist_notifications(&state);
        self.notify_notifications(&state);
        notification
    }

    /// The notification feed, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().notifications.clone()
    }

    /// Count of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.state
            .read()
            .notifications
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    /// Mark one notification read.
    pub fn mark_read(&self, id: Uuid) -> Result<(), NotifyError> {
        let mut state = self.state.write();
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NotifyError::NotificationNotFound(id))?;
        notification.read = true;
        self.persist_notifications(&state);
        self.notify_notifications(&state);
        Ok(())
    }

    /// Mark every notification read.
    pub fn mark_all_read(&self) {
        let mut state = self.state.write();
        for n in &mut state.notifications {
            n.read = true;
        }
        self.persist_notifications(&state);
        self.notify_notifications(&state);
    }

    /// Delete one notification.
    pub fn delete(&self, id: Uuid) -> Result<(), NotifyError> {
        let mut state = self.state.write();
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        if state.notifications.len() == before {
            return Err(NotifyError::NotificationNotFound(id));
        }
        self.persist_notifications(&state);
        self.notify_notifications(&state);
        Ok(())
    }

    /// Clear the entire feed.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.notifications.clear();
        self.persist_notifications(&state);
        self.notify_notifications(&state);
    }

    // -- Price alerts --------------------------------------------------------

    /// Create a standing price alert, armed.
    pub fn add_alert(&self, input: NewPriceAlert) -> Result<PriceAlert, NotifyError> {
        let target_price = validate_amount(input.target_price)?;
        let alert = PriceAlert {
            id: Uuid::new_v4(),
            symbol: input.symbol,
            condition: input.condition,
            target_price,
            current_price: input.current_price,
            active: true,
            created_at: Timestamp::now(),
        };

        let mut state = self.state.write();
        state.alerts.push(alert.clone());
        self.persist_alerts(&state);
        self.notify_alerts(&state);
        Ok(alert)
    }

    /// Remove a standing alert.
    pub fn remove_alert(&self, id: Uuid) -> Result<(), NotifyError> {
        let mut state = self.state.write();
        let before = state.alerts.len();
        state.alerts.retain(|a| a.id != id);
        if state.alerts.len() == before {
            return Err(NotifyError::AlertNotFound(id));
        }
        self.persist_alerts(&state);
        self.notify_alerts(&state);
        Ok(())
    }

    /// Apply a partial update to a standing alert.
    pub fn update_alert(
        &self,
        id: Uuid,
        update: PriceAlertUpdate,
    ) -> Result<PriceAlert, NotifyError> {
        if let Some(target) = update.target_price {
            validate_amount(target)?;
        }

        let mut state = self.state.write();
        let alert = state
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(NotifyError::AlertNotFound(id))?;

        if let Some(condition) = update.condition {
            alert.condition = condition;
        }
        if let Some(target) = update.target_price {
            alert.target_price = target;
        }
        if let Some(active) = update.active {
            alert.active = active;
        }
        let updated = alert.clone();

        self.persist_alerts(&state);
        self.notify_alerts(&state);
        Ok(updated)
    }

    /// The standing alerts.
    pub fn alerts(&self) -> Vec<PriceAlert> {
        self.state.read().alerts.clone()
    }

    /// Check every armed alert against the given market ticks.
    ///
    /// An alert whose condition is met fires a price-alert notification
    /// and deactivates itself, so it fires exactly once. Returns the IDs
    /// of the alerts that fired.
    pub fn check_price_alerts(&self, ticks: &[MarketTick]) -> Vec<Uuid> {
        let mut fired = Vec::new();
        let mut new_notifications = Vec::new();

        {
            let mut state = self.state.write();
            for alert in &mut state.alerts {
                if !alert.active {
                    continue;
                }
                let Some(tick) = ticks.iter().find(|t| t.symbol == alert.symbol) else {
                    continue;
                };

                let triggered = match alert.condition {
                    AlertCondition::Above => tick.price >= alert.target_price,
                    AlertCondition::Below => tick.price <= alert.target_price,
                };
                if !triggered {
                    continue;
                }

                alert.active = false;
                alert.current_price = tick.price;
                fired.push(alert.id);

                let direction = match alert.condition {
                    AlertCondition::Above => "above",
                    AlertCondition::Below => "below",
                };
                new_notifications.push(Notification {
                    id: Uuid::new_v4(),
                    title: "Price Alert Triggered".to_string(),
                    message: format!(
                        "{} is now {direction} ${}. Current price: ${}",
                        alert.symbol, alert.target_price, tick.price
                    ),
                    kind: NotificationKind::PriceAlert,
                    timestamp: Timestamp::now(),
                    read: false,
                    data: serde_json::to_value(&*alert).ok().map(|a| {
                        serde_json::json!({ "alert": a, "currentPrice": tick.price })
                    }),
                });
            }

            if !fired.is_empty() {
                for notification in new_notifications {
                    state.notifications.insert(0, notification);
                }
                self.persist_notifications(&state);
                self.persist_alerts(&state);
                self.notify_notifications(&state);
                self.notify_alerts(&state);
            }
        }

        fired
    }

    // -- Internals -----------------------------------------------------------

    fn persist_notifications(&self, state: &NotifyState) {
        self.persist(KEY_NOTIFICATIONS, &state.notifications);
    }

    fn persist_alerts(&self, state: &NotifyState) {
        self.persist(KEY_ALERTS, &state.alerts);
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(vault) = &self.vault {
            if let Err(e) = vault.save(key, value) {
                tracing::warn!(error = %e, key, "failed to persist notification snapshot");
            }
        }
    }

    fn notify_notifications(&self, state: &NotifyState) {
        let _ = self.events.send(NotificationEvent::NotificationsChanged(
            state.notifications.clone(),
        ));
    }

    fn notify_alerts(&self, state: &NotifyState) {
        let _ = self
            .events
            .send(NotificationEvent::AlertsChanged(state.alerts.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(s: &str) -> AssetSymbol {
        AssetSymbol::new(s).unwrap()
    }

    fn service() -> NotificationService {
        NotificationService::new(None).unwrap()
    }

    fn system_notification(title: &str) -> NewNotification {
        NewNotification {
            title: title.to_string(),
            message: "body".to_string(),
            kind: NotificationKind::System,
            data: None,
        }
    }

    fn btc_alert(condition: AlertCondition, target: f64) -> NewPriceAlert {
        NewPriceAlert {
            symbol: symbol("BTC/USDT"),
            condition,
            target_price: target,
            current_price: 40_000.0,
        }
    }

    fn tick(sym: &str, price: f64) -> MarketTick {
        MarketTick {
            symbol: symbol(sym),
            price,
            change_24h: 0.0,
            volume_24h: 0.0,
        }
    }

    #[test]
    fn push_prepends_unread_notification() {
        let svc = service();
        svc.push(system_notification("first"));
        svc.push(system_notification("second"));

        let feed = svc.notifications();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].title, "second");
        assert!(!feed[0].read);
        assert_eq!(svc.unread_count(), 2);
    }

    #[test]
    fn mark_read_clears_one() {
        let svc = service();
        let n = svc.push(system_notification("a"));
        svc.push(system_notification("b"));

        svc.mark_read(n.id).unwrap();
        assert_eq!(svc.unread_count(), 1);
    }

    #[test]
    fn mark_read_unknown_fails() {
        let err = service().mark_read(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, NotifyError::NotificationNotFound(_)));
    }

    #[test]
    fn mark_all_read_clears_every_notification() {
        let svc = service();
        svc.push(system_notification("a"));
        svc.push(system_notification("b"));
        svc.mark_all_read();
        assert_eq!(svc.unread_count(), 0);
    }

    #[test]
    fn delete_and_clear() {
        let svc = service();
        let n = svc.push(system_notification("a"));
        svc.push(system_notification("b"));

        svc.delete(n.id).unwrap();
        assert_eq!(svc.notifications().len(), 1);

        svc.clear();
        assert!(svc.notifications().is_empty());
    }

    #[test]
    fn delete_unknown_fails() {
        let err = service().delete(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, NotifyError::NotificationNotFound(_)));
    }

    #[test]
    fn alert_crud() {
        let svc = service();
        let alert = svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();
        assert!(alert.active);
        assert_eq!(svc.alerts().len(), 1);

        let updated = svc
            .update_alert(
                alert.id,
                PriceAlertUpdate {
                    target_price: Some(50_000.0),
                    ..PriceAlertUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.target_price, 50_000.0);

        svc.remove_alert(alert.id).unwrap();
        assert!(svc.alerts().is_empty());
    }

    #[test]
    fn alert_rejects_nonpositive_target() {
        let svc = service();
        assert!(svc.add_alert(btc_alert(AlertCondition::Above, 0.0)).is_err());
        assert!(svc.add_alert(btc_alert(AlertCondition::Above, -5.0)).is_err());
    }

    #[test]
    fn update_unknown_alert_fails() {
        let err = service()
            .update_alert(Uuid::new_v4(), PriceAlertUpdate::default())
            .unwrap_err();
        assert!(matches!(err, NotifyError::AlertNotFound(_)));
    }

    #[test]
    fn above_alert_fires_at_or_over_target() {
        let svc = service();
        let alert = svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();

        let fired = svc.check_price_alerts(&[tick("BTC/USDT", 45_000.0)]);
        assert_eq!(fired, vec![alert.id]);

        let feed = svc.notifications();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, NotificationKind::PriceAlert);
        assert!(feed[0].message.contains("above"));

        // Fired alerts deactivate.
        assert!(!svc.alerts()[0].active);
    }

    #[test]
    fn below_alert_fires_at_or_under_target() {
        let svc = service();
        svc.add_alert(btc_alert(AlertCondition::Below, 35_000.0)).unwrap();

        let fired = svc.check_price_alerts(&[tick("BTC/USDT", 34_000.0)]);
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn alert_fires_exactly_once() {
        let svc = service();
        svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();

        assert_eq!(svc.check_price_alerts(&[tick("BTC/USDT", 46_000.0)]).len(), 1);
        assert_eq!(svc.check_price_alerts(&[tick("BTC/USDT", 47_000.0)]).len(), 0);
        assert_eq!(svc.notifications().len(), 1);
    }

    #[test]
    fn untriggered_alert_stays_armed() {
        let svc = service();
        svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();

        let fired = svc.check_price_alerts(&[tick("BTC/USDT", 44_999.0)]);
        assert!(fired.is_empty());
        assert!(svc.alerts()[0].active);
        assert!(svc.notifications().is_empty());
    }

    #[test]
    fn alerts_ignore_unrelated_ticks() {
        let svc = service();
        svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();
        let fired = svc.check_price_alerts(&[tick("ETH/USDT", 99_999.0)]);
        assert!(fired.is_empty());
    }

    #[test]
    fn subscribers_see_feed_changes() {
        let svc = service();
        let mut rx = svc.subscribe();
        svc.push(system_notification("hello"));

        match rx.try_recv().unwrap() {
            NotificationEvent::NotificationsChanged(feed) => assert_eq!(feed.len(), 1),
            other => panic!("expected NotificationsChanged, got {other:?}"),
        }
    }

    #[test]
    fn state_survives_restart_through_vault() {
        let tmp = tempfile::tempdir().unwrap();

        {
            let vault = JsonVault::open(tmp.path()).unwrap();
            let svc = NotificationService::new(Some(vault)).unwrap();
            svc.push(system_notification("persisted"));
            svc.add_alert(btc_alert(AlertCondition::Above, 45_000.0)).unwrap();
        }

        let vault = JsonVault::open(tmp.path()).unwrap();
        let svc = NotificationService::new(Some(vault)).unwrap();
        assert_eq!(svc.notifications().len(), 1);
        assert_eq!(svc.notifications()[0].title, "persisted");
        assert_eq!(svc.alerts().len(), 1);
    }
}
