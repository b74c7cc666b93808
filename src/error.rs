use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::AuditPayload;

#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("Order {0} not found")]
    NotFound(i32),

    #[error("Patient {0} not found")]
    PatientNotFound(i32),

    #[error("Notification {0} not found")]
    NotificationNotFound(i32),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Too many requests, retry in {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LabError {
    pub fn status(&self) -> StatusCode {
        match self {
            LabError::NotFound(_)
            | LabError::PatientNotFound(_)
            | LabError::NotificationNotFound(_) => StatusCode::NOT_FOUND,
            LabError::InvalidId(_) | LabError::Validation(_) => StatusCode::BAD_REQUEST,
            LabError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LabError::DatabaseError(_) | LabError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for LabError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match &self {
            LabError::NotFound(_)
            | LabError::PatientNotFound(_)
            | LabError::NotificationNotFound(_) => ("Not Found", self.to_string()),
            LabError::InvalidId(_) | LabError::Validation(_) => ("Bad Request", self.to_string()),
            LabError::RateLimited { .. } => ("Too Many Requests", self.to_string()),
            LabError::DatabaseError(e) => {
                tracing::error!(error = %e, "Database error while serving request");
                ("Database Error", "Database error occurred".to_string())
            }
            LabError::Internal(e) => {
                tracing::error!(error = %e, "Unhandled internal error");
                ("Internal Server Error", "Internal server error".to_string())
            }
        };

        let mut body = json!({
            "statusCode": status.as_u16(),
            "error": error,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        let audit = AuditPayload(json!({ "error": message }));

        let mut response = if let LabError::RateLimited { retry_after } = self {
            body["retryAfter"] = json!(retry_after);
            let mut response = (status, Json(body)).into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        } else {
            (status, Json(body)).into_response()
        };

        response.extensions_mut().insert(audit);
        response
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
