//! Application error type mapping to HTTP status codes and JSON bodies.
//!
//! Storage failures are logged with full detail; clients only ever see a
//! fixed message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use helpdesk_types::error::{ChatError, ValidationError};

/// Reply body returned when a message could not be processed.
pub const MESSAGE_FAILED_REPLY: &str = "Sorry, I encountered an error processing your message.";

/// Error body returned when a history lookup failed.
pub const HISTORY_FAILED_ERROR: &str = "Failed to retrieve history";

#[derive(Debug)]
pub enum AppError {
    /// Rejected input; the text is returned as `{"error": ...}`.
    BadRequest(String),
    /// `POST /chat/message` failed after validation.
    MessageFailed(ChatError),
    /// `GET /chat/history/{id}` failed after validation.
    HistoryFailed(ChatError),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::MessageFailed(e) => {
                error!(error = %e, "failed to process chat message");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "reply": MESSAGE_FAILED_REPLY })),
                )
                    .into_response()
            }
            AppError::HistoryFailed(e) => {
                error!(error = %e, "failed to load chat history");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": HISTORY_FAILED_ERROR })),
                )
                    .into_response()
            }
        }
    }
}
