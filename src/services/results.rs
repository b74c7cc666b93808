use std::sync::Arc;

use crate::error::{LabError, Result};
use crate::models::{
    Aggregation, GroupWithProcedures, LabReport, OrderHeader, PatientAndOrder, ResultSource,
    ResultStatistics,
};

use super::aggregation::{build_groups, count_entries};
use super::patient::patient_and_order_from_row;

/// Builds laboratory result reports for single orders on top of a
/// [`ResultSource`]. Holds no per-request state.
pub struct ResultsService {
    source: Arc<dyn ResultSource>,
    report_excluded_rows: bool,
}

impl ResultsService {
    pub fn new(source: Arc<dyn ResultSource>) -> Self {
        Self {
            source,
            report_excluded_rows: false,
        }
    }

    /// Also count result rows dropped by the catalog joins.
    pub fn with_excluded_rows(mut self, enabled: bool) -> Self {
        self.report_excluded_rows = enabled;
        self
    }

    pub async fn order_exists(&self, order_id: i32) -> Result<bool> {
        Ok(self.source.find_order(order_id).await?.is_some())
    }

    pub async fn verify_order(&self, order_id: i32) -> Result<OrderHeader> {
        self.source
            .find_order(order_id)
            .await?
            .ok_or(LabError::NotFound(order_id))
    }

    /// Result tree only. An order without results, or an unknown order,
    /// yields an empty list.
    pub async fn group_results(&self, order_id: i32) -> Result<Vec<GroupWithProcedures>> {
        let rows = self.source.result_rows(order_id).await?;
        Ok(build_groups(rows))
    }

    pub async fn compute_statistics(&self, order_id: i32) -> Result<ResultStatistics> {
        self.source.statistics(order_id).await
    }

    /// Result tree plus statistics. Does not check that the order exists;
    /// call [`Self::order_exists`] first.
    pub async fn aggregate(&self, order_id: i32) -> Result<Aggregation> {
        let (rows, statistics, raw_count) = tokio::try_join!(
            self.source.result_rows(order_id),
            self.source.statistics(order_id),
            self.raw_count(order_id),
        )?;

        let joined = rows.len() as i64;
        let excluded_rows = raw_count.map(|raw| (raw - joined).max(0));
        if let Some(excluded) = excluded_rows.filter(|n| *n > 0) {
            tracing::warn!(
                order_id,
                excluded,
                "Result rows dropped for missing test, procedure, group or billing code"
            );
        }

        let groups = build_groups(rows);
        tracing::debug!(
            order_id,
            groups = groups.len(),
            entries = count_entries(&groups),
            "Aggregated order results"
        );

        Ok(Aggregation {
            groups,
            statistics,
            excluded_rows,
        })
    }

    pub async fn resolve_patient_and_order(&self, order_id: i32) -> Result<PatientAndOrder> {
        let row = self
            .source
            .patient_order_row(order_id)
            .await?
            .ok_or(LabError::NotFound(order_id))?;

        if row.patient_id.is_none() {
            tracing::warn!(order_id, "Order has no linked patient");
        }

        Ok(patient_and_order_from_row(&row))
    }

    /// Existence check, then the result tree, statistics and patient data
    /// fetched concurrently.
    pub async fn full_report(&self, order_id: i32) -> Result<LabReport> {
        if !self.order_exists(order_id).await? {
            tracing::info!(order_id, "Report requested for unknown order");
            return Err(LabError::NotFound(order_id));
        }

        let (aggregation, info) = tokio::try_join!(
            self.aggregate(order_id),
            self.resolve_patient_and_order(order_id),
        )?;

        Ok(LabReport {
            groups: aggregation.groups,
            patient: info.patient,
            order: info.order,
            statistics: aggregation.statistics,
            excluded_rows: aggregation.excluded_rows,
        })
    }

    async fn raw_count(&self, order_id: i32) -> Result<Option<i64>> {
        if !self.report_excluded_rows {
            return Ok(None);
        }
        self.source.raw_result_count(order_id).await.map(Some)
    }
}
