use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::{LabError, Result};
use crate::validation::parse_id;

/// Order id taken from the `:id` path segment.
///
/// Rejects non-numeric and non-positive ids with the regular JSON error body
/// instead of axum's plain-text path rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderId(pub i32);

/// Notification id taken from the `:id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationId(pub i32);

/// Recipient user id taken from the `:user_id` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

async fn single_path_id<S>(parts: &mut Parts, state: &S, kind: &str) -> Result<i32>
where
    S: Send + Sync,
{
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| LabError::InvalidId(rejection.body_text()))?;

    parse_id(&raw, kind)
}

#[async_trait]
impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        single_path_id(parts, state, "order").await.map(OrderId)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for NotificationId
where
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        single_path_id(parts, state, "notification")
            .await
            .map(NotificationId)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = LabError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        single_path_id(parts, state, "user").await.map(UserId)
    }
}
