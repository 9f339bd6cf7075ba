//! Layout, role visibility, attention filtering, and dashboard state for
//! the Dental IQ agent dashboard.
//!
//! Everything in this crate is synchronous and free of I/O apart from
//! configuration loading. The host service and the desk client both drive
//! the same [`DashboardState`] reducer.
//!
//! # Modules
//!
//! - [`attention`] -- Per-agent-type attention rules, the rule registry,
//!   and the describer that turns flagged rows into attention items.
//! - [`config`] -- Configuration loading from `dentaliq-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- The selection / modal / checklist state machine.
//! - [`error`] -- Error types for state transitions.
//! - [`geometry`] -- Circular agent layout and popup-direction tags.
//! - [`payload`] -- Per-load host payload assembly.
//! - [`roster`] -- The five default agents and their sample records.
//! - [`simulator`] -- Random record generation per agent type.
//! - [`visibility`] -- Job role to visible agent mapping.
//!
//! [`DashboardState`]: controller::DashboardState

pub mod attention;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod payload;
pub mod roster;
pub mod simulator;
pub mod visibility;

// Re-export primary types at crate root.
pub use attention::{AttentionRegistry, AttentionRule, describe_attention_item, needs_attention};
pub use config::{ConfigError, DashboardConfig};
pub use controller::{Checklist, DashboardState, ModalView, Selection, UiEvent};
pub use error::CoreError;
pub use geometry::{layout, layout_count, popup_direction};
pub use payload::PayloadBuilder;
pub use roster::default_agents;
pub use simulator::DataSimulator;
pub use visibility::{can_see, visible_agents};
