use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::StatusMessage;

/// Errors surfaced synchronously to whoever starts a check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("{0}")]
    Validation(String),
    #[error("A check is already running. Please wait.")]
    Conflict,
}

/// Notification delivery failure. Logged by the worker, never surfaced.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("delivery to {recipient} failed: {reason}")]
    Delivery { recipient: String, reason: String },
    #[error("delivery timed out after {0:?}")]
    TimedOut(std::time::Duration),
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let code = match self {
            CheckError::Validation(_) => StatusCode::BAD_REQUEST,
            CheckError::Conflict => StatusCode::CONFLICT,
        };
        (code, Json(StatusMessage::new(self.to_string()))).into_response()
    }
}
