use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Appointment, AppointmentStatus};
use crate::services::booking;
use crate::state::AppState;

const DEFAULT_DURATION_MINUTES: i32 = 30;
const MAX_DURATION_MINUTES: i32 = 24 * 60;

#[derive(Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub date_time: String,
    pub duration_minutes: i32,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<queries::AppointmentSummary> for AppointmentResponse {
    fn from(summary: queries::AppointmentSummary) -> Self {
        Self {
            id: summary.id,
            patient_id: summary.patient_id,
            patient_name: summary.patient_name,
            doctor_name: summary.doctor_name,
            doctor_specialty: summary.doctor_specialty,
            date_time: summary.date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_minutes: summary.duration_minutes,
            status: summary.status,
            notes: summary.notes,
            created_at: summary.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// POST /api/appointments
#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: String,
    pub patient_name: Option<String>,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let patient_id = body.user_id.trim();
    if patient_id.is_empty() {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    }

    let duration = body.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    if duration <= 0 || duration > MAX_DURATION_MINUTES {
        return Err(AppError::BadRequest(
            "duration_minutes must be between 1 and 1440".to_string(),
        ));
    }

    let date_time = NaiveDateTime::parse_from_str(
        &format!("{} {}", body.date.trim(), body.time.trim()),
        "%Y-%m-%d %H:%M",
    )
    .map_err(|_| {
        AppError::BadRequest("invalid date or time, expected YYYY-MM-DD and HH:MM".to_string())
    })?;

    let db = state.db.lock().unwrap();

    let doctor = queries::get_doctor_by_id(&db, body.doctor_id.trim())?
        .ok_or_else(|| AppError::NotFound(format!("doctor {}", body.doctor_id.trim())))?;

    booking::validate_appointment_time(&db, &doctor, &date_time, duration)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let appointment = Appointment {
        id: Uuid::new_v4().to_string(),
        patient_id: patient_id.to_string(),
        patient_name: body.patient_name.clone(),
        doctor_id: doctor.id.clone(),
        date_time,
        duration_minutes: duration,
        status: AppointmentStatus::Scheduled,
        notes: body.notes.clone(),
        created_at: now,
        updated_at: now,
    };

    queries::create_appointment(&db, &appointment)?;

    tracing::info!(
        appointment_id = %appointment.id,
        doctor = %doctor.name,
        "appointment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse {
            id: appointment.id,
            patient_id: appointment.patient_id,
            patient_name: appointment.patient_name,
            doctor_name: doctor.name,
            doctor_specialty: doctor.specialty,
            date_time: appointment.date_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_minutes: appointment.duration_minutes,
            status: appointment.status.as_str().to_string(),
            notes: appointment.notes,
            created_at: appointment.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }),
    ))
}

// GET /api/appointments?user_id=...
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub user_id: Option<String>,
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let patient_id = query
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;

    let appointments = {
        let db = state.db.lock().unwrap();
        queries::get_patient_appointments(&db, patient_id)?
    };

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

// POST /api/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_appointment_status(&db, &id, &AppointmentStatus::Cancelled)?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err(AppError::NotFound(format!("appointment {id}")))
    }
}
