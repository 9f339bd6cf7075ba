//! Error types for the chat session.
//!
//! Every failure except [`ChatError::Busy`] is also turned into a
//! user-facing message appended to the chat log, so the panel never stays
//! stuck waiting for a reply.

/// Errors that can occur while exchanging a chat message.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Another exchange is still in flight.
    #[error("a chat exchange is already in progress")]
    Busy,

    /// The backend is misconfigured.
    #[error("chat config error: {0}")]
    Config(String),

    /// The HTTP request failed or the host answered with an error status.
    #[error("chat transport error: {0}")]
    Transport(String),

    /// The host answered with something other than JSON.
    #[error("chat response is not JSON (content type {content_type:?})")]
    NotJson {
        /// The content type the host reported.
        content_type: String,
    },

    /// The JSON answer had neither a response nor a pending marker.
    #[error("chat response has no `response` field")]
    MissingResponse,

    /// The host kept answering `pending` until the poll budget ran out.
    #[error("chat response still pending after {polls} polls")]
    PendingExhausted {
        /// Polls attempted after the first request.
        polls: u32,
    },

    /// The exchange exceeded its deadline.
    #[error("chat exchange timed out")]
    Timeout,

    /// The exchange was cancelled.
    #[error("chat exchange cancelled")]
    Cancelled,
}

impl ChatError {
    /// Localized message shown in the chat log for this failure.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Busy => "Počkejte prosím na dokončení předchozí odpovědi.",
            Self::Timeout | Self::PendingExhausted { .. } => {
                "Omlouvám se, odpověď trvá příliš dlouho. Zkuste to prosím znovu."
            }
            Self::Cancelled => "Odeslání zprávy bylo zrušeno.",
            Self::Config(_)
            | Self::Transport(_)
            | Self::NotJson { .. }
            | Self::MissingResponse => {
                "Omlouvám se, došlo k chybě při komunikaci. Zkuste to prosím znovu."
            }
        }
    }
}
