use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Doctor;
use crate::state::AppState;

// GET /api/doctors
#[derive(Deserialize)]
pub struct DoctorsQuery {
    pub specialty: Option<String>,
}

pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DoctorsQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let filter = query
        .specialty
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let db = state.db.lock().unwrap();
    let doctors = match filter {
        Some(specialty) => queries::find_doctors_by_specialty(&db, specialty)?,
        None => queries::list_doctors(&db)?,
    };

    Ok(Json(doctors))
}

// GET /api/doctors/:id
pub async fn get_doctor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = {
        let db = state.db.lock().unwrap();
        queries::get_doctor_by_id(&db, &id)?
    };

    match doctor {
        Some(doctor) => Ok(Json(doctor)),
        None => Err(AppError::NotFound(format!("doctor {id}"))),
    }
}
