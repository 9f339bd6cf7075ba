//! Dashboard host for the Dental IQ agent dashboard.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Rendered dashboard** (`GET /`) built server-side from `minijinja`
//!   templates over the current [`DashboardState`] and host payload. The same path answers
//!   `?chat_message=` with JSON and handles `?logout=true`.
//! - **REST endpoints** for the host payload, the circular layout, an
//!   agent's attention items, and the dashboard state.
//! - **Command endpoints** that feed UI events through the dashboard
//!   reducer and switch simulation mode.
//!
//! # Architecture
//!
//! The dashboard state sits behind one `RwLock` inside [`AppState`] and
//! is only mutated through [`DashboardState::apply`]. The host payload is
//! rebuilt on every request from the immutable roster, so simulated rows
//! never accumulate.
//!
//! [`DashboardState`]: dentaliq_core::DashboardState
//! [`DashboardState::apply`]: dentaliq_core::DashboardState::apply

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use render::PageRenderer;
pub use router::build_router;
pub use server::{ServerError, spawn_server, start_server};
pub use state::AppState;
