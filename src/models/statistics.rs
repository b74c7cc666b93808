use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-order counts. The per-slot counts are computed independently and may
/// overlap when a row has more than one populated slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResultStatistics {
    pub total_results: i64,
    pub total_procedures: i64,
    pub total_groups: i64,
    pub numeric_results: i64,
    pub option_results: i64,
    pub text_results: i64,
    pub memo_results: i64,
}
