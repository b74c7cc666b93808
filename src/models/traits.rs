use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::audit::AuditEntry;
use super::notification::{NewNotification, Notification};
use super::patient::{OrderHeader, PatientOrderRow};
use super::profile::PersonRow;
use super::result::ResultRow;
use super::statistics::ResultStatistics;
use crate::error::Result;

/// Read-only access to the laboratory schema for a single order.
///
/// Every method re-derives what it needs from the order id alone, so callers
/// may issue them concurrently.
#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Direct lookup on the base order table.
    async fn find_order(&self, order_id: i32) -> Result<Option<OrderHeader>>;

    /// Result rows surviving the catalog joins, ordered by group name,
    /// billing-code name and test name.
    async fn result_rows(&self, order_id: i32) -> Result<Vec<ResultRow>>;

    /// Result rows for the order before any catalog join.
    async fn raw_result_count(&self, order_id: i32) -> Result<i64>;

    async fn statistics(&self, order_id: i32) -> Result<ResultStatistics>;

    /// `None` when the order id has no row in the base order table.
    async fn patient_order_row(&self, order_id: i32) -> Result<Option<PatientOrderRow>>;
}

/// Destination for audit records written by the audit middleware.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditEntry) -> Result<()>;
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn find_person(&self, person_id: i32) -> Result<Option<PersonRow>>;
}

/// Persistence for user notifications. Lookups by id return `None` when the
/// row does not exist.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Insert an already validated notification, unread.
    async fn insert(&self, notification: NewNotification) -> Result<Notification>;

    async fn set_read(
        &self,
        id: i32,
        read: bool,
        read_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Notification>>;

    async fn unread_count(&self, user_id: i32) -> Result<i64>;

    /// `false` when nothing was deleted.
    async fn delete(&self, id: i32) -> Result<bool>;
}
