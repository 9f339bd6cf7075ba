//! Error types for the `dentaliq-core` crate.
//!
//! Rendering and filtering never fail: absent data degrades to an empty
//! view. Only dashboard state transitions that reference something that
//! does not exist (or that the user may not see) return [`CoreError`].

use dentaliq_types::{AgentId, JobRole};

/// Errors that can occur while applying a UI event to the dashboard state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The event references an agent that is not part of the payload.
    #[error("agent not found: {0}")]
    UnknownAgent(AgentId),

    /// The agent exists but the user's job role may not work with it.
    #[error("agent {agent} is not visible to job role {role:?}")]
    AgentNotVisible {
        /// The requested agent.
        agent: AgentId,
        /// The job role of the current user.
        role: JobRole,
    },

    /// A checklist operation was issued while no simulated modal is open.
    #[error("no attention checklist is open")]
    NoChecklist,

    /// A checklist item index is out of range.
    #[error("checklist item {index} out of range (len {len})")]
    ChecklistIndex {
        /// The requested index.
        index: usize,
        /// Number of items currently shown.
        len: usize,
    },
}
