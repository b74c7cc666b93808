use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One result row joined with its test, procedure, group, billing code and
/// optional selected option, exactly as the results query returns it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ResultRow {
    pub result_id: i32,
    pub result_date: Option<NaiveDateTime>,
    pub order_id: i32,
    pub procedure_id: i32,
    pub test_id: i32,
    pub option_id: Option<i32>,
    pub option_value: Option<String>,
    pub numeric_value: Option<f64>,
    pub text_value: Option<String>,
    pub memo_value: Option<String>,
    pub processing_count: Option<i32>,

    // Test
    pub test_code: String,
    pub test_name: String,
    pub result_type_id: i32,
    pub unit: Option<String>,
    pub test_enabled: Option<bool>,

    // Procedure
    pub cups_id: i32,
    pub method: Option<String>,

    // Group
    pub group_id: i32,
    pub group_code: String,
    pub group_name: String,
    pub group_enabled: Option<bool>,

    // Billing code (CUPS)
    pub cups_code: String,
    pub cups_name: String,
    pub cups_enabled: Option<bool>,

    // Selected option with its reference range
    pub option_label: Option<String>,
    pub ref_min_male: Option<f64>,
    pub ref_max_male: Option<f64>,
    pub ref_min_female: Option<f64>,
    pub ref_max_female: Option<f64>,
}

/// Which value slot a result was reported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Numeric,
    Option,
    Text,
    Memo,
}

/// The value a result reports once slot precedence has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ReportedValue {
    Numeric(f64),
    #[serde(rename = "option")]
    Coded(String),
    Text(String),
    Memo(String),
}

impl ReportedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ReportedValue::Numeric(_) => ValueKind::Numeric,
            ReportedValue::Coded(_) => ValueKind::Option,
            ReportedValue::Text(_) => ValueKind::Text,
            ReportedValue::Memo(_) => ValueKind::Memo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWithProcedures {
    pub group_id: i32,
    pub group_code: String,
    pub group_name: String,
    pub group_enabled: Option<bool>,
    pub procedures: Vec<ProcedureWithTests>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureWithTests {
    pub procedure_id: i32,
    pub procedure: ProcedureInfo,
    pub tests: Vec<TestWithResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureInfo {
    pub id: i32,
    pub cups_id: i32,
    pub method: Option<String>,
    pub code: String,
    pub name: String,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestWithResult {
    pub test: TestInfo,
    pub result: ResultInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInfo {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub unit: Option<String>,
    pub result_type_id: i32,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInfo {
    pub id: i32,
    pub date: Option<NaiveDateTime>,
    pub order_id: i32,
    pub procedure_id: i32,
    pub test_id: i32,
    pub option_id: Option<i32>,
    pub option_label: Option<String>,
    pub option_value: Option<String>,
    pub numeric_value: Option<f64>,
    pub text_value: Option<String>,
    pub memo_value: Option<String>,
    pub processing_count: Option<i32>,
    /// Value selected by slot precedence, `None` when every slot is empty.
    pub value: Option<ReportedValue>,
    pub reference_min: Option<f64>,
    pub reference_max: Option<f64>,
}
