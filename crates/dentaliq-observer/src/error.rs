//! Error types for the dashboard host.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dentaliq_chat::ChatError;
use dentaliq_core::CoreError;

/// Errors that can occur in the host API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The user's role may not work with the requested agent.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request conflicts with the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An invalid query parameter or body was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A page template failed to load or render.
    #[error("template error: {0}")]
    Template(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ObserverError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnknownAgent(_) => Self::NotFound(e.to_string()),
            CoreError::AgentNotVisible { .. } => Self::Forbidden(e.to_string()),
            CoreError::NoChecklist | CoreError::ChecklistIndex { .. } => {
                Self::Conflict(e.to_string())
            }
        }
    }
}

impl From<ChatError> for ObserverError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Busy => Self::Conflict(e.to_string()),
            _ => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Template(msg) | Self::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
