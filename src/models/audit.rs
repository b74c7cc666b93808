use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single access record destined for `audit_log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: String,
    pub table_name: Option<String>,
    pub record_id: i32,
    pub http_status: i32,
    pub ip: String,
    pub user_agent: String,
    pub moment: DateTime<Utc>,
    /// Request context: method, url, decoded query and selected headers.
    pub body: Value,
    /// Outcome: the redacted response payload, or `{ "error": message }`.
    pub new_data: Option<Value>,
}

/// Response extension carrying what the audit layer stores as `new_data`.
/// Set by handlers on success and by `LabError` on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditPayload(pub Value);
