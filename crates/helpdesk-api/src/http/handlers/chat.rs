//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /chat/message              - Send a message, get the reply
//! - GET  /chat/history/{session_id} - Full transcript of a session

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use helpdesk_types::chat::{ChatReply, HistoryEntry, SendMessageRequest, validate_session_id};
use helpdesk_types::error::ValidationError;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /chat/message
///
/// Malformed JSON is reported as a 400 with the extractor's message.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = request.validate()?;

    let reply = state
        .chat_service
        .process_message(&request.message, request.session_id.as_deref())
        .await
        .map_err(AppError::MessageFailed)?;

    Ok(Json(reply))
}

/// GET /chat/history/{session_id}
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let session_id = validate_session_id(&session_id)?;

    let history = state
        .chat_service
        .get_conversation_history(session_id)
        .await
        .map_err(AppError::HistoryFailed)?;

    Ok(Json(history))
}

/// GET /chat/history without a session id.
pub async fn missing_session_id() -> AppError {
    ValidationError::MissingSessionId.into()
}
