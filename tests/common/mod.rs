#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use labtrack::error::{LabError, Result};
use labtrack::models::{
    AuditEntry, AuditSink, NewNotification, Notification, NotificationStore, OrderHeader,
    PatientOrderRow, PersonRow, ProfileSource, ResultRow, ResultSource, ResultStatistics,
};
use labtrack::services::{NotificationService, ProfileService, ResultsService};

pub const SCENARIO_ORDER_ID: i32 = 84577;
pub const EMPTY_ORDER_ID: i32 = 500;
pub const EXTERNAL_ORDER_ID: i32 = 600;
pub const ORPHAN_ORDER_ID: i32 = 700;
pub const UNKNOWN_ORDER_ID: i32 = 999_999;

#[derive(Default)]
struct StoredOrder {
    header: Option<OrderHeader>,
    patient: Option<PatientOrderRow>,
    rows: Vec<ResultRow>,
    /// Rows whose group or billing-code joins fail. Their procedure still
    /// resolves, so the statistics query counts them.
    orphaned_rows: i64,
}

/// In-memory stand-in for the PostgreSQL schema. Returns rows in the same
/// order the results query sorts them.
#[derive(Default)]
pub struct InMemorySource {
    orders: HashMap<i32, StoredOrder>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, header: OrderHeader, patient: PatientOrderRow) -> Self {
        let stored = self.orders.entry(header.id).or_default();
        stored.header = Some(header);
        stored.patient = Some(patient);
        self
    }

    pub fn with_rows(mut self, order_id: i32, rows: Vec<ResultRow>) -> Self {
        self.orders.entry(order_id).or_default().rows.extend(rows);
        self
    }

    pub fn with_orphaned_rows(mut self, order_id: i32, count: i64) -> Self {
        self.orders.entry(order_id).or_default().orphaned_rows = count;
        self
    }

    fn order(&self, order_id: i32) -> Option<&StoredOrder> {
        self.orders.get(&order_id)
    }
}

#[async_trait]
impl ResultSource for InMemorySource {
    async fn find_order(&self, order_id: i32) -> Result<Option<OrderHeader>> {
        Ok(self.order(order_id).and_then(|o| o.header.clone()))
    }

    async fn result_rows(&self, order_id: i32) -> Result<Vec<ResultRow>> {
        let mut rows = self
            .order(order_id)
            .map(|o| o.rows.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| {
            (&a.group_name, &a.cups_name, &a.test_name).cmp(&(
                &b.group_name,
                &b.cups_name,
                &b.test_name,
            ))
        });
        Ok(rows)
    }

    async fn raw_result_count(&self, order_id: i32) -> Result<i64> {
        Ok(self
            .order(order_id)
            .map(|o| o.rows.len() as i64 + o.orphaned_rows)
            .unwrap_or(0))
    }

    async fn statistics(&self, order_id: i32) -> Result<ResultStatistics> {
        let rows = self
            .order(order_id)
            .map(|o| o.rows.as_slice())
            .unwrap_or_default();
        let orphaned = self.order(order_id).map(|o| o.orphaned_rows).unwrap_or(0);

        let procedures: HashSet<i32> = rows.iter().map(|r| r.procedure_id).collect();
        let groups: HashSet<i32> = rows.iter().map(|r| r.group_id).collect();
        let count = |f: fn(&ResultRow) -> bool| rows.iter().filter(|r| f(r)).count() as i64;

        Ok(ResultStatistics {
            total_results: rows.len() as i64 + orphaned,
            total_procedures: procedures.len() as i64,
            total_groups: groups.len() as i64,
            numeric_results: count(|r| r.numeric_value.is_some()),
            option_results: count(|r| r.option_value.is_some()),
            text_results: count(|r| r.text_value.is_some()),
            memo_results: count(|r| r.memo_value.is_some()),
        })
    }

    async fn patient_order_row(&self, order_id: i32) -> Result<Option<PatientOrderRow>> {
        Ok(self.order(order_id).and_then(|o| o.patient.clone()))
    }
}

/// Source whose every query fails like a dropped database connection.
pub struct FailingSource;

#[async_trait]
impl ResultSource for FailingSource {
    async fn find_order(&self, _order_id: i32) -> Result<Option<OrderHeader>> {
        Err(LabError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn result_rows(&self, _order_id: i32) -> Result<Vec<ResultRow>> {
        Err(LabError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn raw_result_count(&self, _order_id: i32) -> Result<i64> {
        Err(LabError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn statistics(&self, _order_id: i32) -> Result<ResultStatistics> {
        Err(LabError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn patient_order_row(&self, _order_id: i32) -> Result<Option<PatientOrderRow>> {
        Err(LabError::DatabaseError(sqlx::Error::PoolTimedOut))
    }
}

#[derive(Default)]
pub struct RecordingAuditSink {
    pub entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAuditSink {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

pub fn order_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 14)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
}

pub fn order_header(id: i32, external: bool) -> OrderHeader {
    OrderHeader {
        id,
        number: Some(format!("{}", id + 1_000_000)),
        date: Some(order_date()),
        external_professional: Some(external),
    }
}

pub fn patient_row(order_id: i32, external: bool) -> PatientOrderRow {
    PatientOrderRow {
        order_id,
        order_number: Some(format!("{}", order_id + 1_000_000)),
        order_date: Some(order_date()),
        patient_card_id: Some(31),
        external_professional: Some(external),
        patient_id: Some(77),
        document_number: Some("1098765432".to_string()),
        first_name: Some("Laura".to_string()),
        middle_name: None,
        last_name: Some("Martínez".to_string()),
        second_last_name: Some("Rojas".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1988, 3, 2),
        address: Some("Calle 10 # 4-20".to_string()),
        mobile_phone: Some("3001234567".to_string()),
        email: Some("laura@example.com".to_string()),
        document_type_code: Some("CC".to_string()),
        document_type_name: Some("Cédula de ciudadanía".to_string()),
        insurer_code: Some("EPS001".to_string()),
        insurer_name: Some("Salud Total".to_string()),
        sex_description: Some("Femenino".to_string()),
        prof_first_name: Some("Andrés".to_string()),
        prof_middle_name: None,
        prof_last_name: Some("Gil".to_string()),
        prof_second_last_name: None,
        prof_medical_registry: Some("RM-5521".to_string()),
    }
}

/// Result row builder with every optional column empty.
pub fn result_row(
    result_id: i32,
    order_id: i32,
    group: (i32, &str),
    procedure: (i32, &str),
    test: (i32, &str),
) -> ResultRow {
    ResultRow {
        result_id,
        result_date: Some(order_date()),
        order_id,
        procedure_id: procedure.0,
        test_id: test.0,
        option_id: None,
        option_value: None,
        numeric_value: None,
        text_value: None,
        memo_value: None,
        processing_count: Some(1),
        test_code: format!("PR{}", test.0),
        test_name: test.1.to_string(),
        result_type_id: 1,
        unit: None,
        test_enabled: Some(true),
        cups_id: procedure.0 + 9000,
        method: Some("Automated".to_string()),
        group_id: group.0,
        group_code: format!("GR{}", group.0),
        group_name: group.1.to_string(),
        group_enabled: Some(true),
        cups_code: format!("9{:05}", procedure.0),
        cups_name: procedure.1.to_string(),
        cups_enabled: Some(true),
        option_label: None,
        ref_min_male: None,
        ref_max_male: None,
        ref_min_female: None,
        ref_max_female: None,
    }
}

/// Three rows: two procedures in Hematology, one in Chemistry. Stored out of
/// order so the source's sorting is exercised.
pub fn scenario_rows() -> Vec<ResultRow> {
    let mut hemoglobin = result_row(
        3,
        SCENARIO_ORDER_ID,
        (2, "Hematology"),
        (20, "Complete blood count"),
        (201, "Hemoglobin"),
    );
    hemoglobin.numeric_value = Some(13.2);
    hemoglobin.unit = Some("g/dL".to_string());
    hemoglobin.option_id = Some(55);
    hemoglobin.option_label = Some("Adult".to_string());
    hemoglobin.ref_min_male = Some(13.5);
    hemoglobin.ref_max_male = Some(17.5);
    hemoglobin.ref_min_female = Some(12.0);
    hemoglobin.ref_max_female = Some(15.5);

    let mut platelets = result_row(
        2,
        SCENARIO_ORDER_ID,
        (2, "Hematology"),
        (21, "Platelet count"),
        (211, "Platelets"),
    );
    platelets.numeric_value = Some(250_000.0);

    let mut glucose = result_row(
        1,
        SCENARIO_ORDER_ID,
        (1, "Chemistry"),
        (10, "Fasting glucose"),
        (101, "Glucose"),
    );
    glucose.numeric_value = Some(92.0);
    glucose.unit = Some("mg/dL".to_string());

    vec![hemoglobin, platelets, glucose]
}

/// Source with the scenario order, an order without results, an order placed
/// by an external professional and an order with orphaned rows.
pub fn seeded_source() -> InMemorySource {
    let mut orphan_kept = result_row(
        40,
        ORPHAN_ORDER_ID,
        (1, "Chemistry"),
        (10, "Fasting glucose"),
        (101, "Glucose"),
    );
    orphan_kept.text_value = Some("Hemolyzed sample".to_string());

    InMemorySource::new()
        .with_order(
            order_header(SCENARIO_ORDER_ID, false),
            patient_row(SCENARIO_ORDER_ID, false),
        )
        .with_rows(SCENARIO_ORDER_ID, scenario_rows())
        .with_order(order_header(EMPTY_ORDER_ID, false), patient_row(EMPTY_ORDER_ID, false))
        .with_order(
            order_header(EXTERNAL_ORDER_ID, true),
            patient_row(EXTERNAL_ORDER_ID, true),
        )
        .with_order(order_header(ORPHAN_ORDER_ID, false), patient_row(ORPHAN_ORDER_ID, false))
        .with_rows(ORPHAN_ORDER_ID, vec![orphan_kept])
        .with_orphaned_rows(ORPHAN_ORDER_ID, 2)
}

pub fn seeded_service() -> ResultsService {
    ResultsService::new(Arc::new(seeded_source()))
}

pub const KNOWN_PERSON_ID: i32 = 77;

#[derive(Default)]
pub struct InMemoryProfiles {
    people: HashMap<i32, PersonRow>,
}

impl InMemoryProfiles {
    pub fn with_person(mut self, row: PersonRow) -> Self {
        self.people.insert(row.person_id, row);
        self
    }
}

#[async_trait]
impl ProfileSource for InMemoryProfiles {
    async fn find_person(&self, person_id: i32) -> Result<Option<PersonRow>> {
        Ok(self.people.get(&person_id).cloned())
    }
}

pub fn person_row() -> PersonRow {
    PersonRow {
        person_id: KNOWN_PERSON_ID,
        document_type_id: Some(1),
        document_type: Some("Cédula de ciudadanía".to_string()),
        document_number: Some("1098765432".to_string()),
        first_name: Some("Laura".to_string()),
        middle_name: None,
        last_name: Some("Martínez".to_string()),
        second_last_name: Some("Rojas".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1988, 3, 2),
        sex_id: Some(2),
        sex: Some("Femenino".to_string()),
        address: Some("Calle 10 # 4-20".to_string()),
        mobile_phone: Some("3001234567".to_string()),
        email: Some("laura@example.com".to_string()),
        insurer_code: Some("EPS001".to_string()),
        insurer_name: Some("Salud Total".to_string()),
    }
}

pub fn profile_service() -> ProfileService {
    ProfileService::new(Arc::new(InMemoryProfiles::default().with_person(person_row())))
}

/// Notification table kept in memory.
#[derive(Default)]
pub struct InMemoryNotifications {
    rows: Mutex<Vec<Notification>>,
}

impl InMemoryNotifications {
    pub fn all(&self) -> Vec<Notification> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotifications {
    async fn insert(&self, notification: NewNotification) -> Result<Notification> {
        let mut rows = self.rows.lock().unwrap();
        let created = Notification {
            id: rows.iter().map(|n| n.id).max().unwrap_or(0) + 1,
            user_id: notification.user_id,
            kind: notification.kind.unwrap_or_default(),
            title: notification.title,
            message: notification.message,
            data: notification.data,
            metadata: notification.metadata,
            read: false,
            created_at: Utc::now(),
            read_at: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn set_read(
        &self,
        id: i32,
        read: bool,
        read_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Notification>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|n| n.id == id).map(|n| {
            n.read = read;
            n.read_at = read_at;
            n.clone()
        }))
    }

    async fn unread_count(&self, user_id: i32) -> Result<i64> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|n| n.user_id == user_id && !n.read).count() as i64)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| n.id != id);
        Ok(rows.len() < before)
    }
}

pub fn notification_service() -> (NotificationService, Arc<InMemoryNotifications>) {
    let store = Arc::new(InMemoryNotifications::default());
    (NotificationService::new(store.clone()), store)
}

pub fn new_notification(user_id: i32, title: &str) -> NewNotification {
    NewNotification {
        user_id,
        kind: None,
        title: title.to_string(),
        message: "Your laboratory results are available".to_string(),
        data: None,
        metadata: None,
    }
}
