//! HTTP request handlers

use super::types::{CountriesResponse, ErrorResponse, MessageRequest};
use super::AppState;
use crate::runtime::DispatchOutcome;
use crate::state_machine::Event;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Structured events (start, text, location, next, prev, stop)
        .route("/api/chats/:chat_id/events", post(post_event))
        // Raw chat messages with command parsing
        .route("/api/chats/:chat_id/messages", post(post_message))
        // Catalog
        .route("/api/countries", get(list_countries))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Events
// ============================================================

async fn post_event(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(event): Json<Event>,
) -> Result<Json<DispatchOutcome>, AppError> {
    handle_event(&state, &chat_id, event).await
}

async fn post_message(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<DispatchOutcome>, AppError> {
    let event = Event::from_message(&req.text, &req.user_name);
    handle_event(&state, &chat_id, event).await
}

async fn handle_event(
    state: &AppState,
    chat_id: &str,
    event: Event,
) -> Result<Json<DispatchOutcome>, AppError> {
    let outcome = state
        .sessions
        .dispatch(chat_id, event)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(outcome))
}

// ============================================================
// Catalog
// ============================================================

async fn list_countries(State(state): State<AppState>) -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: state.sessions.catalog().countries().to_vec(),
    })
}

async fn get_version() -> &'static str {
    concat!("lighthouse-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
