use serde::{Deserialize, Serialize};

use super::patient::{Order, Patient};
use super::result::GroupWithProcedures;
use super::statistics::ResultStatistics;

/// Result tree of one order plus its independently computed counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub groups: Vec<GroupWithProcedures>,
    pub statistics: ResultStatistics,
    /// Rows dropped by the catalog joins; only computed when enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_rows: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub groups: Vec<GroupWithProcedures>,
    pub patient: Patient,
    pub order: Order,
    pub statistics: ResultStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_rows: Option<i64>,
}
