use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use super::audited_json;
use crate::error::{LabError, Result};
use crate::extractors::{NotificationId, UserId};
use crate::models::{MarkRead, NewNotification};
use crate::services::NotificationService;

pub type SharedNotificationService = Arc<NotificationService>;

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| LabError::Validation(rejection.body_text()))
}

/// Create a notification
pub async fn create_notification(
    State(service): State<SharedNotificationService>,
    payload: std::result::Result<Json<NewNotification>, JsonRejection>,
) -> Result<Response> {
    let created = service.create(json_body(payload)?).await?;
    audited_json(&created)
}

/// Mark a notification read or unread
pub async fn mark_read(
    State(service): State<SharedNotificationService>,
    NotificationId(id): NotificationId,
    payload: std::result::Result<Json<MarkRead>, JsonRejection>,
) -> Result<Response> {
    let MarkRead { read } = json_body(payload)?;
    let updated = service.mark_read(id, read).await?;
    audited_json(&updated)
}

/// Unread notifications for one user
pub async fn unread_count(
    State(service): State<SharedNotificationService>,
    UserId(user_id): UserId,
) -> Result<Response> {
    let count = service.unread_count(user_id).await?;
    audited_json(&count)
}

/// Delete a notification
pub async fn delete_notification(
    State(service): State<SharedNotificationService>,
    NotificationId(id): NotificationId,
) -> Result<Response> {
    service.delete(id).await?;
    audited_json(&json!({ "ok": true }))
}
