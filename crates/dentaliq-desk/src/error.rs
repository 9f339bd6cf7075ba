//! Error types for the desk client.
//!
//! Uses `thiserror` for typed errors surfacing from configuration, the
//! host connection, local storage, and the chat session.

use dentaliq_chat::ChatError;
use dentaliq_core::CoreError;

/// Errors that can occur while running the desk client.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The dashboard host was unreachable or answered with an error.
    #[error("host error: {0}")]
    Host(String),

    /// Local storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Navigation to the logout URL failed.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// A typed command could not be understood.
    #[error("unknown command: {0}")]
    Command(String),

    /// A UI event was rejected by the dashboard reducer.
    #[error("dashboard error: {0}")]
    Dashboard(#[from] CoreError),

    /// The chat session rejected a message.
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Terminal I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
