pub mod health;
pub mod notifications;
pub mod profile;
pub mod results;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::AuditPayload;

/// Top-level keys whose values never reach the audit log.
const REDACTED_KEYS: [&str; 4] = ["password", "token", "secret", "key"];

/// JSON response that also hands the audit layer a redacted copy of the
/// payload.
pub fn audited_json<T: Serialize>(payload: &T) -> Result<Response> {
    let body = serde_json::to_value(payload).context("Failed to serialize response body")?;

    let mut response = Json(&body).into_response();
    response
        .extensions_mut()
        .insert(AuditPayload(redact(body)));
    Ok(response)
}

fn redact(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        for key in REDACTED_KEYS {
            if let Some(field) = map.get_mut(key) {
                *field = Value::String("[REDACTED]".to_string());
            }
        }
    }
    value
}
