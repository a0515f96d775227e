//! # Notifications & Price Alerts API
//!
//! The notification feed (list, read tracking, delete/clear) and the
//! standing price alerts (CRUD plus tick-driven checking).
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/notifications` | `list_notifications` |
//! | `POST` | `/api/notifications` | `push_notification` |
//! | `POST` | `/api/notifications/read` | `mark_read` |
//! | `DELETE` | `/api/notifications/:id` | `delete_notification` |
//! | `DELETE` | `/api/notifications` | `clear_notifications` |
//! | `GET` | `/api/alerts` | `list_alerts` |
//! | `POST` | `/api/alerts` | `create_alert` |
//! | `PATCH` | `/api/alerts/:id` | `update_alert` |
//! | `DELETE` | `/api/alerts/:id` | `delete_alert` |
//! | `POST` | `/api/alerts/check` | `check_alerts` |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use cex_core::AssetSymbol;
use cex_state::{
    AlertCondition, NewNotification, NewPriceAlert, NotificationKind, PriceAlertUpdate,
};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::routes::portfolio::TicksRequest;
use crate::state::AppState;

/// Request to push a notification.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationRequest {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Classification (e.g. `"system"`, `"security"`).
    #[schema(value_type = String)]
    pub kind: NotificationKind,
    /// Optional structured payload.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Validate for PushNotificationRequest {
    fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("message must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to mark notifications read: one by id, or all when omitted.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkReadRequest {
    /// The notification to mark; all unread when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
}

/// Request to create a price alert.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAlertRequest {
    /// Watched symbol.
    #[schema(value_type = String)]
    pub symbol: AssetSymbol,
    /// `"above"` or `"below"`.
    #[schema(value_type = String)]
    pub condition: AlertCondition,
    /// Trigger threshold.
    pub target_price: f64,
    /// Price at creation time.
    #[serde(default)]
    pub current_price: f64,
}

/// Partial alert update.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertRequest {
    /// New fire direction.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub condition: Option<AlertCondition>,
    /// New trigger threshold.
    #[serde(default)]
    pub target_price: Option<f64>,
    /// Arm or disarm.
    #[serde(default)]
    pub active: Option<bool>,
}

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/notifications",
            get(list_notifications)
                .post(push_notification)
                .delete(clear_notifications),
        )
        .route("/api/notifications/read", post(mark_read))
        .route("/api/notifications/:id", delete(delete_notification))
        .route("/api/alerts", get(list_alerts).post(create_alert))
        .route("/api/alerts/check", post(check_alerts))
        .route("/api/alerts/:id", patch(update_alert).delete(delete_alert))
}

/// GET /api/notifications — The feed plus unread count.
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notification feed"),
    ),
    tag = "notifications"
)]
pub(crate) async fn list_notifications(State(state): State<AppState>) -> Json<serde_json::Value> {
    let notifications = state.notifications.notifications();
    let unread = state.notifications.unread_count();
    Json(serde_json::json!({
        "notifications": notifications,
        "unreadCount": unread,
        "total": notifications.len(),
    }))
}

/// POST /api/notifications — Push a notification onto the feed.
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = PushNotificationRequest,
    responses(
        (status = 201, description = "Notification delivered"),
        (status = 422, description = "Empty title or message", body = crate::error::ErrorBody),
    ),
    tag = "notifications"
)]
pub(crate) async fn push_notification(
    State(state): State<AppState>,
    body: Result<Json<PushNotificationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_validated_json(body)?;
    let notification = state.notifications.push(NewNotification {
        title: req.title,
        message: req.message,
        kind: req.kind,
        data: req.data,
    });
    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /api/notifications/read — Mark one or all notifications read.
#[utoipa::path(
    post,
    path = "/api/notifications/read",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "Notification not found", body = crate::error::ErrorBody),
    ),
    tag = "notifications"
)]
pub(crate) async fn mark_read(
    State(state): State<AppState>,
    body: Result<Json<MarkReadRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = extract_json(body)?;
    match req.id {
        Some(id) => state.notifications.mark_read(id)?,
        None => state.notifications.mark_all_read(),
    }
    Ok(Json(serde_json::json!({
        "success": true,
        "unreadCount": state.notifications.unread_count(),
    })))
}

/// DELETE /api/notifications/:id — Delete one notification.
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Notification not found", body = crate::error::ErrorBody),
    ),
    tag = "notifications"
)]
pub(crate) async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.notifications.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/notifications — Clear the entire feed.
#[utoipa::path(
    delete,
    path = "/api/notifications",
    responses(
        (status = 204, description = "Feed cleared"),
    ),
    tag = "notifications"
)]
pub(crate) async fn clear_notifications(State(state): State<AppState>) -> StatusCode {
    state.notifications.clear();
    StatusCode::NO_CONTENT
}

/// GET /api/alerts — The standing price alerts.
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "Price alerts"),
    ),
    tag = "alerts"
)]
pub(crate) async fn list_alerts(State(state): State<AppState>) -> Json<serde_json::Value> {
    let alerts = state.notifications.alerts();
    Json(serde_json::json!({ "alerts": alerts, "total": alerts.len() }))
}

/// POST /api/alerts — Create a price alert.
#[utoipa::path(
    post,
    path = "/api/alerts",
    request_body = CreateAlertRequest,
    responses(
        (status = 201, description = "Alert created"),
        (status = 422, description = "Invalid target price", body = crate::error::ErrorBody),
    ),
    tag = "alerts"
)]
pub(crate) async fn create_alert(
    State(state): State<AppState>,
    body: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;
    let alert = state.notifications.add_alert(NewPriceAlert {
        symbol: req.symbol,
        condition: req.condition,
        target_price: req.target_price,
        current_price: req.current_price,
    })?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// PATCH /api/alerts/:id — Update a price alert.
#[utoipa::path(
    patch,
    path = "/api/alerts/{id}",
    params(("id" = Uuid, Path, description = "Alert ID")),
    request_body = UpdateAlertRequest,
    responses(
        (status = 200, description = "Updated alert"),
        (status = 404, description = "Alert not found", body = crate::error::ErrorBody),
    ),
    tag = "alerts"
)]
pub(crate) async fn update_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateAlertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let req = extract_json(body)?;
    let alert = state.notifications.update_alert(
        id,
        PriceAlertUpdate {
            condition: req.condition,
            target_price: req.target_price,
            active: req.active,
        },
    )?;
    Ok(Json(alert))
}

/// DELETE /api/alerts/:id — Remove a price alert.
#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    params(("id" = Uuid, Path, description = "Alert ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Alert not found", body = crate::error::ErrorBody),
    ),
    tag = "alerts"
)]
pub(crate) async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.notifications.remove_alert(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/alerts/check — Run armed alerts against market ticks.
#[utoipa::path(
    post,
    path = "/api/alerts/check",
    request_body = TicksRequest,
    responses(
        (status = 200, description = "Triggered alert IDs"),
    ),
    tag = "alerts"
)]
pub(crate) async fn check_alerts(
    State(state): State<AppState>,
    body: Result<Json<TicksRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = extract_json(body)?;
    let triggered = state.notifications.check_price_alerts(&req.ticks);
    Ok(Json(serde_json::json!({
        "triggered": triggered,
        "total": triggered.len(),
    })))
}
