//! HTTP endpoint handlers for the dashboard host.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Rendered dashboard |
//! | `GET` | `/?chat_message=<text>` | Chat reply as `{"response": ...}` |
//! | `GET` | `/?logout=true` | Reset the session, then render |
//! | `GET` | `/api/payload` | Host payload for this load |
//! | `GET` | `/api/layout` | Agent positions on the circle |
//! | `GET` | `/api/agents/{id}/attention` | Attention items of one agent |
//! | `GET` | `/api/state` | Dashboard state and chat log |
//! | `POST` | `/api/ui` | Apply one UI event |
//! | `POST` | `/api/simulation` | Switch simulation mode and target |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use dentaliq_chat::SendOutcome;
use dentaliq_core::{DashboardState, Selection, UiEvent, layout};
use dentaliq_types::{AgentId, AttentionItem};
use tokio_util::sync::CancellationToken;

use crate::error::ObserverError;
use crate::render::PageView;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter and body structs
// ---------------------------------------------------------------------------

/// Query parameters accepted by `GET /`.
#[derive(Debug, Default, serde::Deserialize)]
pub struct IndexQuery {
    /// A chat message to answer instead of rendering the page.
    pub chat_message: Option<String>,
    /// Present (with any value) to log out.
    pub logout: Option<String>,
}

/// Request body for `POST /api/simulation`.
#[derive(Debug, serde::Deserialize)]
pub struct SimulationRequest {
    /// Whether simulation mode should be on.
    pub active: bool,
    /// The agent to simulate; ignored when `active` is false.
    #[serde(default)]
    pub agent: Option<AgentId>,
}

// ---------------------------------------------------------------------------
// GET / -- dashboard, chat, logout
// ---------------------------------------------------------------------------

/// Serve the dashboard, answer a chat message, or log out.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexQuery>,
) -> Result<Response, ObserverError> {
    if let Some(message) = params.chat_message {
        return chat(&state, &message).await.map(IntoResponse::into_response);
    }
    if params.logout.is_some() {
        state.logout().await;
    }
    Ok(render(&state).await?.into_response())
}

async fn render(state: &AppState) -> Result<Html<String>, ObserverError> {
    let payload = state.load_payload().await;
    let positions = layout(&state.layout, &payload.agents);
    let chat = state.chat.messages();
    let dashboard = state.dashboard.read().await;

    let page = state
        .pages
        .render_page(&PageView {
            payload: &payload,
            dashboard: &dashboard,
            positions: &positions,
            chat: &chat,
            typing: state.chat.is_typing(),
        })
        .map_err(|e| ObserverError::Template(format!("page render failed: {e}")))?;
    Ok(Html(page))
}

async fn chat(state: &AppState, message: &str) -> Result<Json<serde_json::Value>, ObserverError> {
    let token = CancellationToken::new();
    let outcome = state.chat.send(message, &token).await?;
    let response = match outcome {
        SendOutcome::Ignored => {
            return Err(ObserverError::InvalidQuery("No message provided".to_owned()));
        }
        SendOutcome::Replied(reply) => reply,
        SendOutcome::Failed(e) => e.user_message().to_owned(),
    };
    Ok(Json(serde_json::json!({ "response": response })))
}

// ---------------------------------------------------------------------------
// GET /api/payload
// ---------------------------------------------------------------------------

/// Return the host payload for this load.
pub async fn get_payload(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.load_payload().await)
}

// ---------------------------------------------------------------------------
// GET /api/layout
// ---------------------------------------------------------------------------

/// Return the layout constants and every agent's position on the
/// circle, in roster order.
pub async fn get_layout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let agents = state.payload.roster();
    let positions: Vec<serde_json::Value> = agents
        .iter()
        .zip(layout(&state.layout, agents))
        .map(|(agent, pos)| {
            serde_json::json!({
                "agent": agent.id,
                "x": pos.x,
                "y": pos.y,
                "angle": pos.angle,
                "popup_direction": pos.popup_direction,
            })
        })
        .collect();

    Json(serde_json::json!({
        "config": state.layout,
        "count": positions.len(),
        "positions": positions,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/agents/{id}/attention
// ---------------------------------------------------------------------------

/// Return the attention items of one agent, including simulated rows
/// when that agent is the active simulation target.
///
/// While that agent's checklist is open the items come from the
/// checklist, in the order `toggle_checklist_item` indexes.
pub async fn get_attention(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ObserverError> {
    {
        let dashboard = state.dashboard.read().await;
        if let Some(items) = open_checklist_items(&dashboard, &id) {
            return Ok(attention_json(&id, &items));
        }
    }

    let payload = state.peek_payload(false).await;
    let agent = payload
        .agent(&id)
        .ok_or_else(|| ObserverError::NotFound(format!("agent {id}")))?;
    let items = state.registry.attention_items(agent);
    Ok(attention_json(agent.id.as_str(), &items))
}

fn open_checklist_items(dashboard: &DashboardState, id: &str) -> Option<Vec<AttentionItem>> {
    let Selection::ModalOpen { agent, simulated: true } = &dashboard.selection else {
        return None;
    };
    if agent != id {
        return None;
    }
    let checklist = dashboard.checklist.as_ref()?;
    Some(checklist.entries().iter().map(|e| e.item.clone()).collect())
}

fn attention_json(id: &str, items: &[AttentionItem]) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "agent": id,
        "count": items.len(),
        "items": items,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/state
// ---------------------------------------------------------------------------

/// Return the dashboard state together with the chat log.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let dashboard = state.dashboard.read().await;
    Ok(Json(serde_json::json!({
        "dashboard": serde_json::to_value(&*dashboard)?,
        "chat": {
            "typing": state.chat.is_typing(),
            "messages": state.chat.messages(),
        },
    })))
}

// ---------------------------------------------------------------------------
// POST /api/ui
// ---------------------------------------------------------------------------

/// Feed one UI event through the dashboard reducer.
///
/// The event is applied to a copy that replaces the state only on
/// success, so a rejected event leaves nothing half-applied.
pub async fn post_ui_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<UiEvent>,
) -> Result<impl IntoResponse, ObserverError> {
    let payload = state.peek_payload(false).await;
    let mut dashboard = state.dashboard.write().await;
    let mut next = dashboard.clone();
    next.apply(&payload.agents, &state.registry, event)?;
    *dashboard = next;
    Ok(Json(serde_json::to_value(&*dashboard)?))
}

// ---------------------------------------------------------------------------
// POST /api/simulation
// ---------------------------------------------------------------------------

/// Switch simulation mode and pick its target in one step.
pub async fn post_simulation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulationRequest>,
) -> Result<impl IntoResponse, ObserverError> {
    let target = request.agent.clone().filter(|_| request.active);
    let payload = state.payload.build(request.active, target.as_ref(), false);
    let agents = payload.agents.as_slice();
    let mut dashboard = state.dashboard.write().await;
    let mut next = dashboard.clone();

    if next.simulate_active != request.active {
        next.apply(agents, &state.registry, UiEvent::ToggleSimulation)?;
    }
    if request.active {
        next.apply(
            agents,
            &state.registry,
            UiEvent::ChooseSimulationAgent {
                agent: request.agent,
            },
        )?;
    }

    tracing::info!(
        active = next.simulate_active,
        agent = ?next.simulation_agent,
        "simulation mode updated"
    );
    *dashboard = next;
    Ok(Json(serde_json::to_value(&*dashboard)?))
}
