use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::health::{health_check, liveness_check, readiness_check, SharedPool};
use super::handlers::notifications::{
    create_notification, delete_notification, mark_read, unread_count, SharedNotificationService,
};
use super::handlers::profile::{read_profile, SharedProfileService};
use super::handlers::results::{
    read_groups, read_patient, read_report, read_statistics, verify_order, SharedResultsService,
};
use crate::middleware::{AuditLayer, RateLimitLayer, RateLimiter};
use crate::models::AuditSink;

pub const VIEW_RESULTS_ACTION: &str = "VIEW_RESULTS";
pub const CREATE_NOTIFICATION_ACTION: &str = "CREATE_NOTIFICATION";
pub const MARK_READ_ACTION: &str = "MARK_READ";
pub const UNREAD_COUNT_ACTION: &str = "UNREAD_COUNT";
pub const DELETE_NOTIFICATION_ACTION: &str = "DELETE_NOTIFICATION";

pub fn results_routes(service: SharedResultsService) -> Router {
    Router::new()
        .route("/results/:id", get(read_report))
        .route("/results/:id/groups", get(read_groups))
        .route("/results/:id/patient", get(read_patient))
        .route("/results/:id/statistics", get(read_statistics))
        .route("/results/:id/verify", get(verify_order))
        .with_state(service)
}

pub fn profile_routes(service: SharedProfileService) -> Router {
    Router::new()
        .route("/profile", get(read_profile))
        .with_state(service)
}

/// Notification routes, each audited under its own action.
pub fn notification_routes(service: SharedNotificationService, audit: Arc<dyn AuditSink>) -> Router {
    let audited = |action: &'static str| AuditLayer::new(audit.clone(), action);

    Router::new()
        .route(
            "/notifications",
            post(create_notification).layer(audited(CREATE_NOTIFICATION_ACTION)),
        )
        .route(
            "/notifications/unread-count/:user_id",
            get(unread_count).layer(audited(UNREAD_COUNT_ACTION)),
        )
        .route(
            "/notifications/:id/read",
            post(mark_read).layer(audited(MARK_READ_ACTION)),
        )
        .route(
            "/notifications/:id",
            delete(delete_notification).layer(audited(DELETE_NOTIFICATION_ACTION)),
        )
        .with_state(service)
}

pub fn health_routes(pool: SharedPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
        .with_state(pool)
}

/// Results routes behind the rate limiter (outer) and the audit recorder
/// (inner). Rejected requests never reach the audit log.
pub fn protected_results_routes(
    service: SharedResultsService,
    audit: Arc<dyn AuditSink>,
    limiter: Arc<RateLimiter>,
) -> Router {
    results_routes(service)
        .layer(AuditLayer::new(audit, VIEW_RESULTS_ACTION))
        .layer(RateLimitLayer::new(limiter))
}

pub fn protected_profile_routes(service: SharedProfileService, limiter: Arc<RateLimiter>) -> Router {
    profile_routes(service).layer(RateLimitLayer::new(limiter))
}

pub fn protected_notification_routes(
    service: SharedNotificationService,
    audit: Arc<dyn AuditSink>,
    limiter: Arc<RateLimiter>,
) -> Router {
    notification_routes(service, audit).layer(RateLimitLayer::new(limiter))
}
