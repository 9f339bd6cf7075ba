//! Core entity structs for the Dental IQ dashboard.
//!
//! Covers the host-supplied data (`Agent`, `UserInfo`, `HostPayload`) and
//! the views the dashboard derives from it (`Position`, `AttentionItem`,
//! `ChatMessage`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentKind, JobRole, PopupDirection, Speaker};
use crate::ids::AgentId;

/// A single record produced by an agent: column name to cell value.
///
/// Column order is significant (it is the display order of the table)
/// and is preserved through serialization.
pub type Row = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// KPIs and tasks
// ---------------------------------------------------------------------------

/// A labelled KPI, serialized as a `[label, value]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Kpi(pub String, pub String);

impl Kpi {
    /// Create a KPI from a label and its formatted value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self(label.into(), value.into())
    }

    /// The KPI label, usually prefixed by an emoji.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The formatted KPI value.
    pub fn value(&self) -> &str {
        &self.1
    }
}

/// A compact KPI shown in the hover popup, serialized as `[icon, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MiniKpi(pub String, pub String);

impl MiniKpi {
    /// Create a mini KPI from an icon and a short value.
    pub fn new(icon: impl Into<String>, value: impl Into<String>) -> Self {
        Self(icon.into(), value.into())
    }

    /// The icon (an emoji).
    pub fn icon(&self) -> &str {
        &self.0
    }

    /// The short value.
    pub fn value(&self) -> &str {
        &self.1
    }
}

/// A follow-up task suggested for an agent in simulation mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationTask {
    /// Human-readable task text.
    pub task: String,
    /// Priority label (`Vysoká`, `Střední`, `Nízká`).
    pub priority: String,
    /// Optional status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

/// A role-specific dashboard entity with KPIs and row-level records.
///
/// Created by the host at load time and never mutated by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Stable agent identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Job description shown under the name.
    pub role: String,
    /// Emoji avatar or a `data:image/...` URL.
    pub avatar: String,
    /// Optional notification line shown on the badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
    /// Headline KPIs.
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    /// Compact KPIs for the hover popup.
    #[serde(default)]
    pub mini_kpis: Vec<MiniKpi>,
    /// Records produced by the agent, in display order.
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Follow-up tasks suggested in simulation mode.
    #[serde(default)]
    pub simulation_tasks: Vec<SimulationTask>,
}

impl Agent {
    /// The business kind of this agent, derived from its id.
    pub fn kind(&self) -> AgentKind {
        AgentKind::from_id(self.id.as_str())
    }

    /// Whether the avatar is an embedded image rather than an emoji.
    pub fn has_image_avatar(&self) -> bool {
        self.avatar.starts_with("data:image")
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Screen position of an agent on the dashboard circle.
///
/// Derived from the agent's index and the total count; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal pixel coordinate of the icon centre.
    pub x: f64,
    /// Vertical pixel coordinate of the icon centre (grows downwards).
    pub y: f64,
    /// Angle in degrees, `-90` is straight up.
    pub angle: f64,
    /// Side on which the popup anchors.
    pub popup_direction: PopupDirection,
}

/// Human-readable summary of a row that needs follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttentionItem {
    /// Primary subject: patient name, sender, or file name.
    pub patient_name: String,
    /// Short context line built from the type-specific fields.
    pub context: String,
    /// What needs to be done.
    pub problem_description: String,
    /// The row the item was derived from.
    pub source_row: Row,
    /// Position of the item within the filtered list.
    pub index: usize,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChatMessage {
    /// Who wrote the message.
    pub speaker: Speaker,
    /// Message text.
    pub text: String,
}

impl ChatMessage {
    /// A message written by the dashboard user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// A message written by the assistant.
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Agent,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Host payload
// ---------------------------------------------------------------------------

/// The logged-in user as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserInfo {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login identifier.
    #[serde(default)]
    pub user_id: String,
    /// Application role (`user`, `admin`).
    #[serde(default)]
    pub role: String,
    /// Job role deciding agent visibility (`doctor`, `receptionist`, `admin`).
    #[serde(default)]
    pub job_role: String,
    /// Clinic the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl UserInfo {
    /// The parsed job role; unknown values fall back to admin.
    pub fn job_role(&self) -> JobRole {
        let raw = self.job_role.trim();
        JobRole::parse((!raw.is_empty()).then_some(raw))
    }

    /// Whether the user may open the administration panel.
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Everything the host hands to the dashboard on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HostPayload {
    /// All agents, in display order.
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Whether simulation mode is active.
    #[serde(default)]
    pub simulate_active: bool,
    /// Id of the simulated agent, or an empty string.
    #[serde(default)]
    pub selected_agent: String,
    /// The logged-in user.
    #[serde(default)]
    pub user_info: UserInfo,
    /// Whether to greet the user on this load.
    #[serde(default)]
    pub show_welcome: bool,
    /// Session token to mirror into local storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl HostPayload {
    /// The simulated agent id, if one is selected.
    pub fn selected_agent_id(&self) -> Option<AgentId> {
        let id = self.selected_agent.trim();
        (!id.is_empty()).then(|| AgentId::from(id))
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }
}
