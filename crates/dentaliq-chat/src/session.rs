//! Single-flight chat session.
//!
//! The session owns the append-only message log and a typing flag. Only
//! one exchange may be in flight; the flag is held by a [`TypingGuard`]
//! so it is released on every exit path, including when the send future
//! is dropped mid-await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dentaliq_core::config::ChatConfig;
use dentaliq_types::ChatMessage;
use tokio_util::sync::CancellationToken;

use crate::backend::ChatBackend;
use crate::error::ChatError;

/// Result of a send that was accepted.
#[derive(Debug)]
pub enum SendOutcome {
    /// The input was empty or whitespace; nothing happened.
    Ignored,
    /// The backend replied; the reply was appended to the log.
    Replied(String),
    /// The exchange failed; a localized message was appended to the log.
    Failed(ChatError),
}

#[derive(Debug, Default)]
struct ChatState {
    log: Vec<ChatMessage>,
    typing: bool,
}

/// A chat panel session shared between tasks.
#[derive(Debug, Clone)]
pub struct ChatSession {
    backend: Arc<ChatBackend>,
    state: Arc<Mutex<ChatState>>,
    timeout: Duration,
}

impl ChatSession {
    /// Create a session over `backend` with a per-exchange deadline.
    pub fn new(backend: ChatBackend, timeout: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            state: Arc::new(Mutex::new(ChatState::default())),
            timeout,
        }
    }

    /// Create a session from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if the backend cannot be built.
    pub fn from_config(config: &ChatConfig, page_url: Option<&str>) -> Result<Self, ChatError> {
        let backend = ChatBackend::from_config(config, page_url)?;
        Ok(Self::new(backend, Duration::from_millis(config.request_timeout_ms)))
    }

    /// The backend answering this session.
    pub fn backend(&self) -> &ChatBackend {
        &self.backend
    }

    /// Snapshot of the message log.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().log.clone()
    }

    /// Whether an exchange is in flight.
    pub fn is_typing(&self) -> bool {
        self.lock().typing
    }

    /// Empty the log. An exchange in flight still appends its reply.
    pub fn clear(&self) {
        self.lock().log.clear();
    }

    /// Send `text` and wait for the reply.
    ///
    /// The exchange races the session deadline and `cancel`. Any failure is
    /// recorded in the log as a localized agent message and reported as
    /// [`SendOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Busy`] if another exchange is in flight. The
    /// log is left untouched in that case.
    pub async fn send(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<SendOutcome, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        let _typing = TypingGuard::acquire(&self.state)?;
        self.lock().log.push(ChatMessage::user(text));
        tracing::debug!(backend = self.backend.name(), "chat exchange started");

        let exchange = tokio::time::timeout(self.timeout, self.backend.complete(text));
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ChatError::Cancelled),
            outcome = exchange => match outcome {
                Ok(reply) => reply,
                Err(_elapsed) => Err(ChatError::Timeout),
            },
        };

        let mut state = self.lock();
        match result {
            Ok(reply) => {
                state.log.push(ChatMessage::agent(reply.clone()));
                Ok(SendOutcome::Replied(reply))
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "chat exchange failed");
                state.log.push(ChatMessage::agent(e.user_message()));
                Ok(SendOutcome::Failed(e))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the typing flag for the duration of one exchange.
struct TypingGuard<'a> {
    state: &'a Mutex<ChatState>,
}

impl<'a> TypingGuard<'a> {
    fn acquire(state: &'a Mutex<ChatState>) -> Result<Self, ChatError> {
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.typing {
            return Err(ChatError::Busy);
        }
        guard.typing = true;
        Ok(Self { state })
    }
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .typing = false;
    }
}
