use crate::models::{Order, Patient, PatientAndOrder, PatientOrderRow};

pub const EXTERNAL_PROFESSIONAL_LABEL: &str = "External professional";
pub const UNSPECIFIED_PROFESSIONAL_LABEL: &str = "Not specified";

/// Join name parts with single spaces, skipping absent and blank parts.
/// Returns `None` when nothing is left.
pub fn compose_name(parts: &[Option<&str>]) -> Option<String> {
    let joined = parts
        .iter()
        .flatten()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Label for whoever ordered the tests.
pub fn ordering_professional(row: &PatientOrderRow) -> String {
    if row.external_professional == Some(true) {
        return EXTERNAL_PROFESSIONAL_LABEL.to_string();
    }

    compose_name(&[
        row.prof_first_name.as_deref(),
        row.prof_middle_name.as_deref(),
        row.prof_last_name.as_deref(),
        row.prof_second_last_name.as_deref(),
    ])
    .unwrap_or_else(|| UNSPECIFIED_PROFESSIONAL_LABEL.to_string())
}

pub fn patient_from_row(row: &PatientOrderRow) -> Patient {
    let first = row.first_name.as_deref();
    let middle = row.middle_name.as_deref();
    let last = row.last_name.as_deref();
    let second_last = row.second_last_name.as_deref();

    Patient {
        id: row.patient_id,
        document_type_code: row.document_type_code.clone(),
        document_type: row.document_type_name.clone(),
        document_number: row.document_number.clone(),
        given_names: compose_name(&[first, middle]),
        family_names: compose_name(&[last, second_last]),
        full_name: compose_name(&[first, middle, last, second_last]),
        birth_date: row.birth_date,
        sex: row.sex_description.clone(),
        phone: row.mobile_phone.clone(),
        email: row.email.clone(),
        address: row.address.clone(),
        insurer_code: row.insurer_code.clone(),
        insurer_name: row.insurer_name.clone(),
    }
}

pub fn patient_and_order_from_row(row: &PatientOrderRow) -> PatientAndOrder {
    let order = Order {
        id: row.order_id,
        number: row.order_number.clone(),
        date: row.order_date,
        ordering_professional: ordering_professional(row),
        professional_registry: row.prof_medical_registry.clone(),
    };

    PatientAndOrder {
        patient: patient_from_row(row),
        order,
    }
}
