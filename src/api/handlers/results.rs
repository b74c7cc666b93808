use axum::{extract::State, response::Response};
use serde_json::json;
use std::sync::Arc;

use super::audited_json;
use crate::error::Result;
use crate::extractors::OrderId;
use crate::services::ResultsService;

pub type SharedResultsService = Arc<ResultsService>;

/// Full report: result tree, patient, order and statistics
pub async fn read_report(
    State(service): State<SharedResultsService>,
    OrderId(id): OrderId,
) -> Result<Response> {
    let report = service.full_report(id).await?;
    audited_json(&report)
}

/// Result tree only
pub async fn read_groups(
    State(service): State<SharedResultsService>,
    OrderId(id): OrderId,
) -> Result<Response> {
    let groups = service.group_results(id).await?;
    audited_json(&json!({ "groups": groups }))
}

/// Patient and order metadata
pub async fn read_patient(
    State(service): State<SharedResultsService>,
    OrderId(id): OrderId,
) -> Result<Response> {
    let info = service.resolve_patient_and_order(id).await?;
    audited_json(&info)
}

/// Result counts
pub async fn read_statistics(
    State(service): State<SharedResultsService>,
    OrderId(id): OrderId,
) -> Result<Response> {
    let statistics = service.compute_statistics(id).await?;
    audited_json(&json!({ "statistics": statistics }))
}

/// Order existence check
pub async fn verify_order(
    State(service): State<SharedResultsService>,
    OrderId(id): OrderId,
) -> Result<Response> {
    let order = service.verify_order(id).await?;
    audited_json(&json!({
        "exists": true,
        "order": order
    }))
}
