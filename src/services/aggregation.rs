use indexmap::IndexMap;

use crate::models::{
    GroupWithProcedures, ProcedureInfo, ProcedureWithTests, ReportedValue, ResultInfo, ResultRow,
    TestInfo, TestWithResult,
};

/// Pick the reported value of a row: numeric, then option, then text, then
/// memo. Slots after the first populated one are ignored.
pub fn reported_value(row: &ResultRow) -> Option<ReportedValue> {
    if let Some(n) = row.numeric_value {
        return Some(ReportedValue::Numeric(n));
    }
    if let Some(o) = &row.option_value {
        return Some(ReportedValue::Coded(o.clone()));
    }
    if let Some(t) = &row.text_value {
        return Some(ReportedValue::Text(t.clone()));
    }
    row.memo_value.clone().map(ReportedValue::Memo)
}

/// Resolve `(min, max)` reference bounds from the selected option.
///
/// The female bound wins whenever it is present, independently of the
/// patient's sex; the male/generic bound is only a fallback. Each end
/// resolves on its own.
pub fn reference_bounds(row: &ResultRow) -> (Option<f64>, Option<f64>) {
    (
        row.ref_min_female.or(row.ref_min_male),
        row.ref_max_female.or(row.ref_max_male),
    )
}

fn test_with_result(row: ResultRow) -> TestWithResult {
    let value = reported_value(&row);
    let (reference_min, reference_max) = reference_bounds(&row);

    TestWithResult {
        test: TestInfo {
            id: row.test_id,
            code: row.test_code,
            name: row.test_name,
            unit: row.unit,
            result_type_id: row.result_type_id,
            enabled: row.test_enabled,
        },
        result: ResultInfo {
            id: row.result_id,
            date: row.result_date,
            order_id: row.order_id,
            procedure_id: row.procedure_id,
            test_id: row.test_id,
            option_id: row.option_id,
            option_label: row.option_label,
            option_value: row.option_value,
            numeric_value: row.numeric_value,
            text_value: row.text_value,
            memo_value: row.memo_value,
            processing_count: row.processing_count,
            value,
            reference_min,
            reference_max,
        },
    }
}

struct GroupAccumulator {
    code: String,
    name: String,
    enabled: Option<bool>,
    procedures: IndexMap<i32, ProcedureWithTests>,
}

/// Fold flat result rows into groups → procedures → tests.
///
/// Groups and procedures appear in first-seen order and tests keep row
/// order, so the output order is whatever order the rows arrived in.
pub fn build_groups(rows: Vec<ResultRow>) -> Vec<GroupWithProcedures> {
    let mut groups: IndexMap<i32, GroupAccumulator> = IndexMap::new();

    for row in rows {
        let group = groups
            .entry(row.group_id)
            .or_insert_with(|| GroupAccumulator {
                code: row.group_code.clone(),
                name: row.group_name.clone(),
                enabled: row.group_enabled,
                procedures: IndexMap::new(),
            });

        let procedure = group
            .procedures
            .entry(row.procedure_id)
            .or_insert_with(|| ProcedureWithTests {
                procedure_id: row.procedure_id,
                procedure: ProcedureInfo {
                    id: row.procedure_id,
                    cups_id: row.cups_id,
                    method: row.method.clone(),
                    code: row.cups_code.clone(),
                    name: row.cups_name.clone(),
                    enabled: row.cups_enabled,
                },
                tests: Vec::new(),
            });

        procedure.tests.push(test_with_result(row));
    }

    groups
        .into_iter()
        .map(|(group_id, group)| GroupWithProcedures {
            group_id,
            group_code: group.code,
            group_name: group.name,
            group_enabled: group.enabled,
            procedures: group.procedures.into_values().collect(),
        })
        .collect()
}

/// Number of test entries across the whole tree.
pub fn count_entries(groups: &[GroupWithProcedures]) -> usize {
    groups
        .iter()
        .flat_map(|g| &g.procedures)
        .map(|p| p.tests.len())
        .sum()
}
