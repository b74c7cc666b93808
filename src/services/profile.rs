use std::sync::Arc;

use crate::error::{LabError, Result};
use crate::models::{PatientProfile, PersonRow, ProfileSource};

use super::patient::compose_name;

pub fn profile_from_row(row: PersonRow) -> PatientProfile {
    let full_name = compose_name(&[
        row.first_name.as_deref(),
        row.middle_name.as_deref(),
        row.last_name.as_deref(),
        row.second_last_name.as_deref(),
    ]);

    PatientProfile {
        id: row.person_id,
        document_type: row.document_type,
        document_number: row.document_number,
        full_name,
        first_name: row.first_name,
        middle_name: row.middle_name,
        last_name: row.last_name,
        second_last_name: row.second_last_name,
        birth_date: row.birth_date,
        sex: row.sex,
        sex_id: row.sex_id,
        address: row.address,
        phone: row.mobile_phone,
        email: row.email,
        insurer_code: row.insurer_code,
        insurer_name: row.insurer_name,
    }
}

pub struct ProfileService {
    source: Arc<dyn ProfileSource>,
}

impl ProfileService {
    pub fn new(source: Arc<dyn ProfileSource>) -> Self {
        Self { source }
    }

    pub async fn profile(&self, person_id: i32) -> Result<PatientProfile> {
        let row = self
            .source
            .find_person(person_id)
            .await?
            .ok_or(LabError::PatientNotFound(person_id))?;

        Ok(profile_from_row(row))
    }
}
