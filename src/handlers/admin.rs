use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::models::{AppointmentStatus, ConversationEntry};
use crate::state::AppState;

use super::appointments::AppointmentResponse;

#[allow(clippy::result_large_err)]
fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), Response> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"error": "unauthorized"})),
        )
            .into_response());
    }
    Ok(())
}

// GET /api/admin/stats
#[derive(Serialize)]
pub struct StatsResponse {
    doctor_count: i64,
    upcoming_appointments: i64,
    total_conversations: i64,
    conversations_today: i64,
    intents: Vec<IntentCount>,
}

#[derive(Serialize)]
pub struct IntentCount {
    intent: String,
    count: i64,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, Response> {
    check_auth(&headers, &state.config.admin_token)?;

    let (stats, breakdown) = {
        let db = state.db.lock().unwrap();
        let stats = queries::get_dashboard_stats(&db).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        })?;
        let breakdown = queries::get_intent_breakdown(&db).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        })?;
        (stats, breakdown)
    };

    Ok(Json(StatsResponse {
        doctor_count: stats.doctor_count,
        upcoming_appointments: stats.upcoming_appointments,
        total_conversations: stats.total_conversations,
        conversations_today: stats.conversations_today,
        intents: breakdown
            .into_iter()
            .map(|(intent, count)| IntentCount { intent, count })
            .collect(),
    }))
}

// GET /api/admin/appointments
#[derive(Deserialize)]
pub struct AppointmentsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<AppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, Response> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let status_filter = query.status.as_deref();

    let appointments = {
        let db = state.db.lock().unwrap();
        queries::get_all_appointments(&db, status_filter, limit).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        })?
    };

    Ok(Json(appointments.into_iter().map(Into::into).collect()))
}

// POST /api/admin/appointments/:id/cancel
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Response> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_appointment_status(&db, &id, &AppointmentStatus::Cancelled).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        })?
    };

    if updated {
        Ok(Json(serde_json::json!({"ok": true})))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "appointment not found"})),
        )
            .into_response())
    }
}

// GET /api/admin/conversations
#[derive(Deserialize)]
pub struct ConversationsQuery {
    pub intent: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_conversations(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ConversationsQuery>,
) -> Result<Json<Vec<ConversationEntry>>, Response> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let intent_filter = query.intent.as_deref();

    let entries = {
        let db = state.db.lock().unwrap();
        queries::get_recent_conversations(&db, intent_filter, limit).map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        })?
    };

    Ok(Json(entries))
}
