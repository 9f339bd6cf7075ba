//! Enumeration types for the Dental IQ dashboard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Agent kinds
// ---------------------------------------------------------------------------

/// Business role of an agent, derived from its id.
///
/// Each kind carries its own attention rule and describes its rows with
/// its own subject and context fields. Unrecognised ids map to
/// [`AgentKind::Other`], which only uses the generic indicator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum AgentKind {
    /// Phone reception: calls, bookings, callbacks.
    Isabella,
    /// E-mail triage.
    Gabriel,
    /// Patient card preparation and archiving.
    Leo,
    /// Patient summaries.
    Nora,
    /// Record audit.
    Auditor,
    /// Any agent the dashboard has no dedicated rule for.
    Other,
}

impl AgentKind {
    /// Every kind with a dedicated rule, in roster order.
    pub const KNOWN: [Self; 5] = [
        Self::Isabella,
        Self::Leo,
        Self::Gabriel,
        Self::Nora,
        Self::Auditor,
    ];

    /// Derive the kind from an agent id (case-insensitive).
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "isabella" => Self::Isabella,
            "gabriel" => Self::Gabriel,
            "leo" => Self::Leo,
            "nora" => Self::Nora,
            "auditor" => Self::Auditor,
            _ => Self::Other,
        }
    }

    /// Canonical agent id for this kind, if it has one.
    pub const fn canonical_id(self) -> Option<&'static str> {
        match self {
            Self::Isabella => Some("isabella"),
            Self::Gabriel => Some("gabriel"),
            Self::Leo => Some("leo"),
            Self::Nora => Some("nora"),
            Self::Auditor => Some("auditor"),
            Self::Other => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Job roles
// ---------------------------------------------------------------------------

/// Job role of the logged-in user; decides which agents they may work with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum JobRole {
    /// Sees the summary and audit agents.
    Doctor,
    /// Sees the phone, e-mail and archiving agents.
    Receptionist,
    /// Sees every agent.
    #[default]
    Admin,
}

impl JobRole {
    /// Parse a host-supplied role. Unknown or missing roles fall back to
    /// [`JobRole::Admin`].
    pub fn parse(role: Option<&str>) -> Self {
        match role.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("doctor") => Self::Doctor,
            Some("receptionist") => Self::Receptionist,
            _ => Self::Admin,
        }
    }
}

// ---------------------------------------------------------------------------
// Popup direction
// ---------------------------------------------------------------------------

/// Side of an agent icon on which its popup anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum PopupDirection {
    /// Popup opens to the left of the icon.
    Left,
    /// Popup opens to the right of the icon.
    Right,
    /// Popup opens above the icon.
    Top,
    /// Popup opens below the icon.
    Bottom,
}

impl PopupDirection {
    /// CSS-friendly lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

// ---------------------------------------------------------------------------
// Chat speaker
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Speaker {
    /// The dashboard user.
    User,
    /// The assistant answering in the chat panel.
    #[serde(alias = "bot")]
    Agent,
}
