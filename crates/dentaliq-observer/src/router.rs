//! Axum router construction for the dashboard host.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so a separately served front-end can read the payload.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard host.
///
/// The router includes:
/// - `GET /` -- rendered dashboard, `?chat_message=` and `?logout=true`
/// - `GET /api/payload` -- host payload
/// - `GET /api/layout` -- agent positions
/// - `GET /api/agents/{id}/attention` -- attention items of one agent
/// - `GET /api/state` -- dashboard state and chat log
/// - `POST /api/ui` -- apply a UI event
/// - `POST /api/simulation` -- switch simulation mode
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page, chat, logout
        .route("/", get(handlers::index))
        // Read API
        .route("/api/payload", get(handlers::get_payload))
        .route("/api/layout", get(handlers::get_layout))
        .route("/api/agents/{id}/attention", get(handlers::get_attention))
        .route("/api/state", get(handlers::get_state))
        // Commands
        .route("/api/ui", post(handlers::post_ui_event))
        .route("/api/simulation", post(handlers::post_simulation))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
