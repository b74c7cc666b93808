use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Minimal order lookup on the base order table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub id: i32,
    pub number: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub external_professional: Option<bool>,
}

/// Order joined with its patient card, person, document type, insurer, sex
/// option and ordering professional. Everything after the order columns is
/// left-joined and may be missing.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct PatientOrderRow {
    pub order_id: i32,
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDateTime>,
    pub patient_card_id: Option<i32>,
    pub external_professional: Option<bool>,

    pub patient_id: Option<i32>,
    pub document_number: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub second_last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub mobile_phone: Option<String>,
    pub email: Option<String>,

    pub document_type_code: Option<String>,
    pub document_type_name: Option<String>,
    pub insurer_code: Option<String>,
    pub insurer_name: Option<String>,
    pub sex_description: Option<String>,

    pub prof_first_name: Option<String>,
    pub prof_middle_name: Option<String>,
    pub prof_last_name: Option<String>,
    pub prof_second_last_name: Option<String>,
    pub prof_medical_registry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Option<i32>,
    pub document_type_code: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub given_names: Option<String>,
    pub family_names: Option<String>,
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub insurer_code: Option<String>,
    pub insurer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub number: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub ordering_professional: String,
    pub professional_registry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAndOrder {
    pub patient: Patient,
    pub order: Order,
}
