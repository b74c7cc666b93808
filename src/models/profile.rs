use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person joined with document type, sex and insurer descriptions.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct PersonRow {
    pub person_id: i32,
    pub document_type_id: Option<i32>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub second_last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex_id: Option<i32>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,
    pub insurer_code: Option<String>,
    pub insurer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: i32,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub second_last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub sex_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub insurer_code: Option<String>,
    pub insurer_name: Option<String>,
}
