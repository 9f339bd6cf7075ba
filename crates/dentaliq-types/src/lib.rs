//! Shared type definitions for the Dental IQ agent dashboard.
//!
//! This crate is the single source of truth for the data that flows from
//! the host to the dashboard: agents, their KPIs and rows, the user, and
//! the derived views (positions, attention items, chat messages). Types
//! defined here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier wrapper for agents
//! - [`enums`] -- Agent kinds, job roles, popup directions, chat speakers
//! - [`structs`] -- Agents, rows, positions, attention items, host payload

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AgentKind, JobRole, PopupDirection, Speaker};
pub use ids::AgentId;
pub use structs::{
    Agent, AttentionItem, ChatMessage, HostPayload, Kpi, MiniKpi, Position, Row, SimulationTask,
    UserInfo,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the dashboard front-end.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings into `bindings/` relative to the crate root
        // when `export_all` is called.
        use ts_rs::TS;

        let _ = crate::ids::AgentId::export_all();

        let _ = crate::enums::AgentKind::export_all();
        let _ = crate::enums::JobRole::export_all();
        let _ = crate::enums::PopupDirection::export_all();
        let _ = crate::enums::Speaker::export_all();

        let _ = crate::structs::Kpi::export_all();
        let _ = crate::structs::MiniKpi::export_all();
        let _ = crate::structs::SimulationTask::export_all();
        let _ = crate::structs::Agent::export_all();
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::AttentionItem::export_all();
        let _ = crate::structs::UserInfo::export_all();
        let _ = crate::structs::HostPayload::export_all();
        let _ = crate::structs::ChatMessage::export_all();
    }
}
