use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{LabError, Result};
use crate::models::PatientProfile;
use crate::services::ProfileService;
use crate::validation::parse_id;

pub type SharedProfileService = Arc<ProfileService>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub person_id: Option<String>,
}

/// Patient profile by person id (`?personId=`)
pub async fn read_profile(
    State(service): State<SharedProfileService>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<PatientProfile>> {
    let raw = query
        .person_id
        .ok_or_else(|| LabError::InvalidId("personId query parameter is required".to_string()))?;
    let person_id = parse_id(&raw, "person")?;

    let profile = service.profile(person_id).await?;
    Ok(Json(profile))
}
