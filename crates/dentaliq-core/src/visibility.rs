//! Job role to visible agent mapping.
//!
//! The mapping decides which agents a user may pick as the simulation
//! target and whether a highlighted agent is actually shown as simulated.

use dentaliq_types::{Agent, AgentId, AgentKind, JobRole};

/// Agent kinds a job role may work with, in roster order.
pub const fn allowed_kinds(role: JobRole) -> &'static [AgentKind] {
    match role {
        JobRole::Doctor => &[AgentKind::Nora, AgentKind::Auditor],
        JobRole::Receptionist => &[AgentKind::Isabella, AgentKind::Gabriel, AgentKind::Leo],
        JobRole::Admin => &AgentKind::KNOWN,
    }
}

/// Whether a user with `role` may work with the agent `id`.
///
/// Agents without a dedicated kind are never visible.
pub fn can_see(role: JobRole, id: &str) -> bool {
    let kind = AgentKind::from_id(id);
    kind != AgentKind::Other && allowed_kinds(role).contains(&kind)
}

/// Ids of the agents in `agents` that `role` may work with, in input order.
pub fn visible_agents(role: JobRole, agents: &[Agent]) -> Vec<AgentId> {
    agents
        .iter()
        .filter(|a| can_see(role, a.id.as_str()))
        .map(|a| a.id.clone())
        .collect()
}
