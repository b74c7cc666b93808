use std::sync::Arc;

use chrono::Utc;

use crate::error::{LabError, Result};
use crate::models::{
    NewNotification, Notification, NotificationStore, UnreadCount, DEFAULT_NOTIFICATION_KIND,
};
use crate::validation::required_text;

const MAX_KIND_CHARS: usize = 32;
const MAX_TITLE_CHARS: usize = 200;

/// Trim and check a create request. Empty `type` falls back to the default.
pub fn normalize(notification: NewNotification) -> Result<NewNotification> {
    if notification.user_id <= 0 {
        return Err(LabError::Validation(format!(
            "userId must be positive, got {}",
            notification.user_id
        )));
    }

    let kind = match notification.kind.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_NOTIFICATION_KIND.to_string(),
        Some(kind) => required_text(kind, "type", MAX_KIND_CHARS)?,
    };

    Ok(NewNotification {
        user_id: notification.user_id,
        kind: Some(kind),
        title: required_text(&notification.title, "title", MAX_TITLE_CHARS)?,
        message: required_text(&notification.message, "message", usize::MAX)?,
        data: notification.data,
        metadata: notification.metadata,
    })
}

pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, notification: NewNotification) -> Result<Notification> {
        let notification = normalize(notification)?;
        self.store.insert(notification).await
    }

    /// Marking read stamps the read time; marking unread clears it.
    pub async fn mark_read(&self, id: i32, read: bool) -> Result<Notification> {
        let read_at = read.then(Utc::now);
        self.store
            .set_read(id, read, read_at)
            .await?
            .ok_or(LabError::NotificationNotFound(id))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<UnreadCount> {
        let count = self.store.unread_count(user_id).await?;
        Ok(UnreadCount { count })
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(LabError::NotificationNotFound(id));
        }
        tracing::info!(id, "Deleted notification");
        Ok(())
    }
}
