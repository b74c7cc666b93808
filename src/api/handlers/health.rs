use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;

pub type SharedPool = Arc<PgPool>;

/// Health check endpoint - checks database connectivity
pub async fn health_check(State(pool): State<SharedPool>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await {
        Ok(_) => {
            tracing::debug!("Health check passed - database connection OK");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "healthy",
                    "api": "LabTrack",
                    "database": "connected",
                    "version": env!("CARGO_PKG_VERSION"),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }
        Err(e) => {
            tracing::error!("Health check failed - database error: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "error": "Database connection failed"
                })),
            )
        }
    }
}

/// Readiness check endpoint - ready once the pool can serve a query
pub async fn readiness_check(State(pool): State<SharedPool>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await {
        Ok(_) => {
            tracing::debug!("Readiness check passed");
            (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "database": "connected"
                })),
            )
        }
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not ready",
                    "database": "disconnected"
                })),
            )
        }
    }
}

/// Liveness check endpoint - indicates if server process is alive
pub async fn liveness_check() -> (StatusCode, Json<Value>) {
    tracing::debug!("Liveness check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "alive"
        })),
    )
}
