use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::models::Intent;
use crate::state::AppState;

const GENERIC_APOLOGY: &str =
    "Sorry, something went wrong on our end. Please try again in a moment.";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub intent: Intent,
    pub response: String,
}

// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let message = payload.message.as_deref().map(str::trim).unwrap_or("");
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Message is required"})),
        )
            .into_response();
    }

    let user_id = payload
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let intent = state.classifier.classify(message);
    let response = state
        .responder
        .respond(intent, message, state.directory.as_ref())
        .await;

    tracing::info!(user_id = ?user_id, intent = intent.as_str(), "chat message handled");

    let recorded = {
        let db = state.db.lock().unwrap();
        queries::insert_conversation(&db, user_id, message, intent.as_str(), &response)
    };

    if let Err(e) = recorded {
        tracing::error!(error = %e, "failed to record conversation");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": e.to_string(),
                "intent": "error",
                "response": GENERIC_APOLOGY,
            })),
        )
            .into_response();
    }

    Json(ChatResponse { intent, response }).into_response()
}
