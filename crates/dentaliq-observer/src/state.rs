//! Shared application state for the dashboard host.
//!
//! [`AppState`] owns the single [`DashboardState`] (behind a read-write
//! lock), the payload builder over the immutable roster, the attention
//! registry, the layout constants, the page templates, and the host's chat
//! session.

use std::sync::atomic::{AtomicBool, Ordering};

use dentaliq_chat::{ChatBackend, ChatError, ChatSession};
use dentaliq_core::config::{ChatBackendKind, ChatConfig, LayoutConfig};
use dentaliq_core::{AttentionRegistry, DashboardConfig, DashboardState, PayloadBuilder, default_agents};
use dentaliq_types::HostPayload;
use tokio::sync::RwLock;

use crate::render::PageRenderer;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// The dashboard state; mutated only through its reducer.
    pub dashboard: RwLock<DashboardState>,
    /// Builds the host payload on every request.
    pub payload: PayloadBuilder,
    /// Attention rules per agent kind.
    pub registry: AttentionRegistry,
    /// Circular layout constants.
    pub layout: LayoutConfig,
    /// Chat session answering `?chat_message=` requests.
    pub chat: ChatSession,
    /// Page templates for `GET /`.
    pub pages: PageRenderer,
    welcome_pending: AtomicBool,
}

impl AppState {
    /// Create the state from its parts.
    pub fn new(
        payload: PayloadBuilder,
        layout: LayoutConfig,
        chat: ChatSession,
        pages: PageRenderer,
    ) -> Self {
        let session = payload.session();
        let dashboard = DashboardState::new(session.user.job_role(), false, None);
        let welcome_pending = AtomicBool::new(session.show_welcome);
        Self {
            dashboard: RwLock::new(dashboard),
            payload,
            registry: AttentionRegistry::default(),
            layout,
            chat,
            pages,
            welcome_pending,
        }
    }

    /// Create the state for the default roster from configuration.
    ///
    /// The host answers chat itself, so a `remote` backend is replaced by
    /// the canned one.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if the chat backend cannot be built.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ChatError> {
        let chat_config = host_chat_config(&config.chat);
        let chat = ChatSession::from_config(&chat_config, None)?;
        let payload = PayloadBuilder::new(
            default_agents(),
            config.simulation.clone(),
            config.session.clone(),
        );
        let pages = config
            .templates_dir
            .as_ref()
            .map_or_else(PageRenderer::embedded, PageRenderer::from_dir);
        Ok(Self::new(payload, config.layout, chat, pages))
    }

    /// Build the host payload for the current dashboard state.
    ///
    /// Consumes the pending welcome greeting: only the first load after
    /// startup or logout reports `show_welcome`.
    pub async fn load_payload(&self) -> HostPayload {
        let show_welcome = self.welcome_pending.swap(false, Ordering::AcqRel);
        self.peek_payload(show_welcome).await
    }

    /// Build the host payload without consuming the welcome greeting.
    pub async fn peek_payload(&self, show_welcome: bool) -> HostPayload {
        let dashboard = self.dashboard.read().await;
        self.payload.build(
            dashboard.simulate_active,
            dashboard.simulation_agent.as_ref(),
            show_welcome,
        )
    }

    /// Reset the dashboard, clear the chat log, and re-arm the greeting.
    pub async fn logout(&self) {
        self.dashboard.write().await.reset();
        self.chat.clear();
        self.welcome_pending
            .store(self.payload.session().show_welcome, Ordering::Release);
        tracing::info!(user = %self.payload.session().user.user_id, "session reset by logout");
    }

    /// The backend answering chat, for logging.
    pub fn chat_backend(&self) -> &ChatBackend {
        self.chat.backend()
    }
}

fn host_chat_config(config: &ChatConfig) -> ChatConfig {
    if config.backend == ChatBackendKind::Remote {
        tracing::warn!("remote chat backend is for clients; host falls back to canned replies");
        ChatConfig {
            backend: ChatBackendKind::Canned,
            ..config.clone()
        }
    } else {
        config.clone()
    }
}
