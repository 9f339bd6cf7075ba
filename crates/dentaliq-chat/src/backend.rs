//! Chat response backends.
//!
//! Enum dispatch over the three ways a reply can be produced: a
//! deterministic echo, a canned reply after a random delay, and a remote
//! `GET <page-url>?chat_message=<text>` against the dashboard host.

use std::time::Duration;

use dentaliq_core::config::{ChatBackendKind, ChatConfig};
use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;

use crate::error::ChatError;

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A backend that turns a user message into a reply.
#[derive(Debug, Clone)]
pub enum ChatBackend {
    /// Replies with the message itself.
    Echo(EchoBackend),
    /// Replies with a canned assistant answer after a random delay.
    Canned(CannedBackend),
    /// Asks the dashboard host over HTTP.
    Remote(RemoteBackend),
}

impl ChatBackend {
    /// Build the backend selected by `config`.
    ///
    /// `page_url` is required for [`ChatBackendKind::Remote`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if the remote backend is selected
    /// without a page URL, or the URL cannot be parsed.
    pub fn from_config(config: &ChatConfig, page_url: Option<&str>) -> Result<Self, ChatError> {
        match config.backend {
            ChatBackendKind::Echo => Ok(Self::Echo(EchoBackend)),
            ChatBackendKind::Canned => Ok(Self::Canned(CannedBackend::new(
                config.reply_delay_min_ms,
                config.reply_delay_max_ms,
            ))),
            ChatBackendKind::Remote => {
                let raw = page_url.ok_or_else(|| {
                    ChatError::Config("remote chat backend requires a page URL".to_owned())
                })?;
                let url = Url::parse(raw)
                    .map_err(|e| ChatError::Config(format!("invalid page URL {raw:?}: {e}")))?;
                Ok(Self::Remote(RemoteBackend::new(
                    url,
                    config.max_polls,
                    Duration::from_millis(config.poll_interval_ms),
                )))
            }
        }
    }

    /// Produce a reply for `message`.
    ///
    /// # Errors
    ///
    /// Only the remote backend fails; see [`RemoteBackend::complete`].
    pub async fn complete(&self, message: &str) -> Result<String, ChatError> {
        match self {
            Self::Echo(backend) => Ok(backend.reply(message)),
            Self::Canned(backend) => Ok(backend.complete(message).await),
            Self::Remote(backend) => backend.complete(message).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Echo(_) => "echo",
            Self::Canned(_) => "canned",
            Self::Remote(_) => "remote",
        }
    }
}

// ---------------------------------------------------------------------------
// Echo backend
// ---------------------------------------------------------------------------

/// Deterministic backend used in tests and offline demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoBackend;

impl EchoBackend {
    /// The reply for `message`.
    pub fn reply(self, message: &str) -> String {
        format!("Echo: {message}")
    }
}

// ---------------------------------------------------------------------------
// Canned backend
// ---------------------------------------------------------------------------

const CANNED_REPLIES: &[&str] = &[
    "Dobrý den, jsem Axel. Přehled agentů vidíte kolem středu obrazovky, klikněte na kteréhokoli z nich pro detail.",
    "Položky označené ⚠ vyžadují vaši pozornost. Otevřete detail agenta a projděte kontrolní seznam.",
    "Isabella eviduje hovory, Gabriel třídí e-maily, Leo kontroluje karty pacientů a Nora připravuje shrnutí.",
    "Auditor porovnává záznamy mezi systémy a upozorní na nesoulady.",
    "Rozumím. Pokud chcete vidět nová data, zapněte simulaci a vyberte agenta.",
    "Tuto informaci zatím nemám k dispozici, zkuste se prosím podívat do detailu agenta.",
];

/// Backend that answers with a canned assistant reply after a random delay.
#[derive(Debug, Clone, Copy)]
pub struct CannedBackend {
    delay_min_ms: u64,
    delay_max_ms: u64,
}

impl CannedBackend {
    /// Create a backend whose delay is drawn from `[min_ms, max_ms]`.
    ///
    /// Swapped bounds are reordered.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            delay_min_ms: min_ms.min(max_ms),
            delay_max_ms: min_ms.max(max_ms),
        }
    }

    /// Pick a delay and a reply.
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> (Duration, &'static str) {
        let delay = rng.random_range(self.delay_min_ms..=self.delay_max_ms);
        let reply = CANNED_REPLIES.choose(rng).copied().unwrap_or("Rozumím.");
        (Duration::from_millis(delay), reply)
    }

    async fn complete(self, message: &str) -> String {
        let (delay, reply) = self.draw(&mut rand::rng());
        tracing::debug!(
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            chars = message.chars().count(),
            "canned chat reply scheduled"
        );
        tokio::time::sleep(delay).await;
        reply.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Remote backend
// ---------------------------------------------------------------------------

/// What the host answers to a chat GET.
#[derive(Debug, Deserialize)]
struct HostAnswer {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    pending: bool,
}

/// Backend that asks the dashboard host over HTTP.
///
/// Sends `GET <page_url>?chat_message=<text>` with `Accept:
/// application/json`. A `{"pending": true}` answer is polled again every
/// `poll_interval`, at most `max_polls` times.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: reqwest::Client,
    page_url: Url,
    max_polls: u32,
    poll_interval: Duration,
}

impl RemoteBackend {
    /// Create a remote backend for `page_url`.
    pub fn new(page_url: Url, max_polls: u32, poll_interval: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            page_url,
            max_polls,
            poll_interval,
        }
    }

    /// The page URL with `chat_message` appended to its query.
    pub fn request_url(&self, message: &str) -> Url {
        let mut url = self.page_url.clone();
        url.query_pairs_mut().append_pair("chat_message", message);
        url
    }

    /// Ask the host for a reply, polling while it answers `pending`.
    ///
    /// # Errors
    ///
    /// - [`ChatError::Transport`] if the request fails or the status is
    ///   not a success.
    /// - [`ChatError::NotJson`] if the host answers with another content
    ///   type.
    /// - [`ChatError::MissingResponse`] if the JSON has no reply.
    /// - [`ChatError::PendingExhausted`] once the poll budget is spent.
    pub async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let url = self.request_url(message);
        let mut polls: u32 = 0;

        loop {
            let answer = self.fetch(&url).await?;
            if let Some(response) = answer.response {
                tracing::debug!(polls, "remote chat reply received");
                return Ok(response);
            }
            if !answer.pending {
                return Err(ChatError::MissingResponse);
            }
            if polls >= self.max_polls {
                return Err(ChatError::PendingExhausted { polls });
            }
            polls = polls.saturating_add(1);
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch(&self, url: &Url) -> Result<HostAnswer, ChatError> {
        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Transport(format!("host returned {status}")));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !content_type.starts_with("application/json") {
            return Err(ChatError::NotJson { content_type });
        }

        resp.json::<HostAnswer>()
            .await
            .map_err(|e| ChatError::Transport(format!("failed to parse response: {e}")))
    }
}
