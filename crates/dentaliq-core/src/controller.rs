//! The dashboard state machine.
//!
//! [`DashboardState`] is the single writer of everything the user can
//! toggle: the agent selection, the detail modal, the simulation flags,
//! the attention checklist, and the chrome panels (chat, user menu,
//! configuration). UI surfaces translate clicks into [`UiEvent`]s and
//! feed them through [`DashboardState::apply`]; rendering only reads.
//!
//! Selection follows three states:
//!
//! ```text
//!   Idle --click A--> AgentSelected(A) --click A--> Idle
//!                          |
//!                      click B / maximize
//!                          v
//!                   ModalOpen { B, simulated }
//! ```
//!
//! An outside click always returns to `Idle`.

use dentaliq_types::{Agent, AgentId, AttentionItem, JobRole};
use serde::{Deserialize, Serialize};

use crate::attention::AttentionRegistry;
use crate::error::CoreError;
use crate::visibility::can_see;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// The user clicked an agent icon.
    AgentClicked {
        /// The clicked agent.
        agent: AgentId,
    },
    /// The user maximized an agent popup into the detail modal.
    OpenModal {
        /// The agent to show.
        agent: AgentId,
    },
    /// The user clicked outside any agent, popup, or modal trigger.
    OutsideClick,
    /// The user closed the detail modal.
    CloseModal,
    /// The user toggled the modal between normal and maximized size.
    ToggleMaximize,
    /// The user clicked the centre logo (mini-KPI popups).
    CenterClicked,
    /// The user toggled simulation mode.
    ToggleSimulation,
    /// The user picked (or cleared) the simulated agent.
    ChooseSimulationAgent {
        /// The chosen agent, `None` to clear.
        #[serde(default)]
        agent: Option<AgentId>,
    },
    /// The user opened or closed the chat panel.
    ToggleChat,
    /// The user opened or closed the user menu.
    ToggleUserMenu,
    /// The user opened or closed the agent configuration panel.
    ToggleConfigPanel,
    /// The user checked or unchecked an attention item.
    ToggleChecklistItem {
        /// Position of the item in the visible checklist.
        index: usize,
    },
    /// The user saved the checklist, dismissing every checked item.
    SaveChecklist,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which agent (if any) the user is focused on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Idle,
    /// An agent is selected and its popup is shown.
    AgentSelected {
        /// The selected agent.
        agent: AgentId,
    },
    /// The detail modal is open.
    ModalOpen {
        /// The agent shown in the modal.
        agent: AgentId,
        /// Whether the modal shows the attention checklist.
        simulated: bool,
    },
}

impl Selection {
    /// The focused agent, if any.
    pub const fn agent(&self) -> Option<&AgentId> {
        match self {
            Self::Idle => None,
            Self::AgentSelected { agent } | Self::ModalOpen { agent, .. } => Some(agent),
        }
    }

    /// Whether the detail modal is open.
    pub const fn is_modal_open(&self) -> bool {
        matches!(self, Self::ModalOpen { .. })
    }
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

/// One row of the attention checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// The attention item shown.
    pub item: AttentionItem,
    /// Whether the user ticked it.
    pub checked: bool,
}

/// The attention checklist of a simulated modal.
///
/// Saving only removes checked entries from this view. The agent's rows
/// are never touched, so the next load shows every item again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    entries: Vec<ChecklistEntry>,
    resolved: usize,
}

impl Checklist {
    /// A checklist with every item unchecked.
    pub fn new(items: Vec<AttentionItem>) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|item| ChecklistEntry {
                    item,
                    checked: false,
                })
                .collect(),
            resolved: 0,
        }
    }

    /// Entries still shown.
    pub fn entries(&self) -> &[ChecklistEntry] {
        &self.entries
    }

    /// Number of entries still shown.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries dismissed by saves since the modal opened.
    pub const fn resolved(&self) -> usize {
        self.resolved
    }

    /// Whether saving would dismiss anything.
    pub fn save_enabled(&self) -> bool {
        self.entries.iter().any(|e| e.checked)
    }

    /// Flip the checked flag of the entry at `index`.
    pub fn toggle(&mut self, index: usize) -> Result<bool, CoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CoreError::ChecklistIndex { index, len })?;
        entry.checked = !entry.checked;
        Ok(entry.checked)
    }

    /// Remove every checked entry and return how many were removed.
    pub fn save(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.checked);
        let removed = before.saturating_sub(self.entries.len());
        self.resolved = self.resolved.saturating_add(removed);
        removed
    }
}

/// What the open modal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView<'a> {
    /// The agent's raw rows as a table.
    Rows(&'a Agent),
    /// The attention checklist of a simulated agent.
    Checklist(&'a Agent, &'a Checklist),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the user can toggle on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DashboardState {
    /// Agent selection and modal.
    pub selection: Selection,
    /// Whether simulation mode is on.
    pub simulate_active: bool,
    /// The agent picked as the simulation target.
    pub simulation_agent: Option<AgentId>,
    /// Job role of the current user.
    pub job_role: JobRole,
    /// Whether the modal is maximized.
    pub modal_maximized: bool,
    /// Whether the mini-KPI popups are shown.
    pub mini_kpis_visible: bool,
    /// Whether the chat panel is open.
    pub chat_open: bool,
    /// Whether the user menu is open.
    pub user_menu_open: bool,
    /// Whether the agent configuration panel is open.
    pub config_panel_open: bool,
    /// Checklist of the open simulated modal.
    pub checklist: Option<Checklist>,
}

impl DashboardState {
    /// Initial state for a page load.
    pub fn new(job_role: JobRole, simulate_active: bool, simulation_agent: Option<AgentId>) -> Self {
        Self {
            simulate_active,
            simulation_agent: simulation_agent.filter(|_| simulate_active),
            job_role,
            ..Self::default()
        }
    }

    /// Whether `agent` is highlighted as the simulated agent.
    pub fn is_simulated(&self, agent: &str) -> bool {
        self.simulate_active
            && self.simulation_agent.as_ref().is_some_and(|a| a == agent)
            && can_see(self.job_role, agent)
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAgent`] when the event names an agent not
    /// in `agents`, [`CoreError::AgentNotVisible`] when the user may not
    /// simulate it, and [`CoreError::NoChecklist`] /
    /// [`CoreError::ChecklistIndex`] for checklist events without a
    /// matching item.
    pub fn apply(
        &mut self,
        agents: &[Agent],
        registry: &AttentionRegistry,
        event: UiEvent,
    ) -> Result<(), CoreError> {
        tracing::debug!(?event, "applying ui event");
        match event {
            UiEvent::AgentClicked { agent } => {
                let agent = find(agents, &agent)?;
                self.mini_kpis_visible = false;
                if self.selection.agent() == Some(&agent.id) {
                    self.close_modal();
                } else if self.selection == Selection::Idle {
                    self.selection = Selection::AgentSelected {
                        agent: agent.id.clone(),
                    };
                } else {
                    self.open_modal(agent, registry);
                }
            }
            UiEvent::OpenModal { agent } => {
                let agent = find(agents, &agent)?;
                self.open_modal(agent, registry);
            }
            UiEvent::OutsideClick => {
                self.close_modal();
                self.mini_kpis_visible = false;
                self.user_menu_open = false;
                self.config_panel_open = false;
            }
            UiEvent::CloseModal => self.close_modal(),
            UiEvent::ToggleMaximize => {
                if self.selection.is_modal_open() {
                    self.modal_maximized = !self.modal_maximized;
                }
            }
            UiEvent::CenterClicked => {
                self.close_modal();
                self.mini_kpis_visible = !self.mini_kpis_visible;
            }
            UiEvent::ToggleSimulation => {
                self.simulate_active = !self.simulate_active;
                if !self.simulate_active {
                    self.simulation_agent = None;
                }
                self.refresh_modal(agents, registry);
            }
            UiEvent::ChooseSimulationAgent { agent: None } => {
                self.simulation_agent = None;
                self.refresh_modal(agents, registry);
            }
            UiEvent::ChooseSimulationAgent { agent: Some(id) } => {
                let agent = find(agents, &id)?;
                if !can_see(self.job_role, agent.id.as_str()) {
                    return Err(CoreError::AgentNotVisible {
                        agent: agent.id.clone(),
                        role: self.job_role,
                    });
                }
                self.simulation_agent = Some(agent.id.clone());
                self.refresh_modal(agents, registry);
            }
            UiEvent::ToggleChat => self.chat_open = !self.chat_open,
            UiEvent::ToggleUserMenu => {
                self.user_menu_open = !self.user_menu_open;
                self.config_panel_open = false;
            }
            UiEvent::ToggleConfigPanel => self.config_panel_open = !self.config_panel_open,
            UiEvent::ToggleChecklistItem { index } => {
                let checklist = self.checklist.as_mut().ok_or(CoreError::NoChecklist)?;
                checklist.toggle(index)?;
            }
            UiEvent::SaveChecklist => {
                let checklist = self.checklist.as_mut().ok_or(CoreError::NoChecklist)?;
                let removed = checklist.save();
                tracing::info!(removed, remaining = checklist.len(), "attention items dismissed");
            }
        }
        Ok(())
    }

    /// What the open modal shows, if a modal is open.
    pub fn modal_view<'a>(&'a self, agents: &'a [Agent]) -> Option<ModalView<'a>> {
        let Selection::ModalOpen { agent, simulated } = &self.selection else {
            return None;
        };
        let agent = agents.iter().find(|a| &a.id == agent)?;
        match (&self.checklist, simulated) {
            (Some(checklist), true) => Some(ModalView::Checklist(agent, checklist)),
            _ => Some(ModalView::Rows(agent)),
        }
    }

    /// Reset to the state of a fresh, logged-out page.
    pub fn reset(&mut self) {
        *self = Self {
            job_role: self.job_role,
            ..Self::default()
        };
    }

    fn open_modal(&mut self, agent: &Agent, registry: &AttentionRegistry) {
        let simulated = self.is_simulated(agent.id.as_str());
        self.checklist = simulated.then(|| Checklist::new(registry.attention_items(agent)));
        self.selection = Selection::ModalOpen {
            agent: agent.id.clone(),
            simulated,
        };
        self.modal_maximized = false;
    }

    /// Rebuild an open modal whose simulated flag no longer holds. A modal
    /// that keeps its flag keeps its checklist and ticks.
    fn refresh_modal(&mut self, agents: &[Agent], registry: &AttentionRegistry) {
        let Selection::ModalOpen { agent, simulated } = &self.selection else {
            return;
        };
        if self.is_simulated(agent.as_str()) == *simulated {
            return;
        }
        let Some(agent) = agents.iter().find(|a| &a.id == agent) else {
            return;
        };
        let maximized = self.modal_maximized;
        self.open_modal(agent, registry);
        self.modal_maximized = maximized;
    }

    fn close_modal(&mut self) {
        self.selection = Selection::Idle;
        self.checklist = None;
        self.modal_maximized = false;
    }
}

fn find<'a>(agents: &'a [Agent], id: &AgentId) -> Result<&'a Agent, CoreError> {
    agents
        .iter()
        .find(|a| &a.id == id)
        .ok_or_else(|| CoreError::UnknownAgent(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::default_agents;

    fn click(id: &str) -> UiEvent {
        UiEvent::AgentClicked {
            agent: AgentId::from(id),
        }
    }

    fn apply(state: &mut DashboardState, agents: &[Agent], event: UiEvent) {
        let result = state.apply(agents, &AttentionRegistry::default(), event);
        assert!(result.is_ok(), "{result:?}");
    }

    fn simulating(agent: &str) -> DashboardState {
        DashboardState::new(JobRole::Admin, true, Some(AgentId::from(agent)))
    }

    #[test]
    fn click_toggles_selection() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        apply(&mut state, &agents, click("leo"));
        assert_eq!(
            state.selection,
            Selection::AgentSelected {
                agent: AgentId::from("leo")
            }
        );
        apply(&mut state, &agents, click("leo"));
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn clicking_another_agent_opens_its_modal() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        apply(&mut state, &agents, click("leo"));
        apply(&mut state, &agents, click("nora"));
        assert_eq!(
            state.selection,
            Selection::ModalOpen {
                agent: AgentId::from("nora"),
                simulated: false
            }
        );
        assert!(matches!(state.modal_view(&agents), Some(ModalView::Rows(a)) if a.id == "nora"));

        apply(&mut state, &agents, click("gabriel"));
        assert_eq!(state.selection.agent().map(AgentId::as_str), Some("gabriel"));
    }

    #[test]
    fn outside_click_closes_everything() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("isabella") });
        apply(&mut state, &agents, UiEvent::ToggleUserMenu);
        apply(&mut state, &agents, UiEvent::ToggleConfigPanel);
        apply(&mut state, &agents, UiEvent::ToggleChat);
        apply(&mut state, &agents, UiEvent::OutsideClick);

        assert_eq!(state.selection, Selection::Idle);
        assert!(!state.user_menu_open);
        assert!(!state.config_panel_open);
        assert!(state.chat_open);
        assert!(state.modal_view(&agents).is_none());
    }

    #[test]
    fn simulated_modal_shows_checklist() {
        let agents = default_agents();
        let mut state = simulating("leo");
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("leo") });

        let view = state.modal_view(&agents);
        assert!(matches!(view, Some(ModalView::Checklist(agent, _)) if agent.id == "leo"));
        let checklist = state.checklist.as_ref();
        assert_eq!(checklist.map(Checklist::len), Some(2));
        assert!(checklist.is_some_and(|c| !c.save_enabled()));
    }

    #[test]
    fn simulation_ignored_for_other_agents() {
        let agents = default_agents();
        let mut state = simulating("leo");
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("nora") });
        assert!(matches!(state.modal_view(&agents), Some(ModalView::Rows(_))));
        assert!(state.checklist.is_none());
    }

    #[test]
    fn simulation_requires_visibility() {
        let agents = default_agents();
        let mut state = DashboardState::new(JobRole::Doctor, true, Some(AgentId::from("leo")));
        assert!(!state.is_simulated("leo"));

        let result = state.apply(
            &agents,
            &AttentionRegistry::default(),
            UiEvent::ChooseSimulationAgent {
                agent: Some(AgentId::from("isabella")),
            },
        );
        assert!(matches!(result, Err(CoreError::AgentNotVisible { .. })));

        apply(
            &mut state,
            &agents,
            UiEvent::ChooseSimulationAgent {
                agent: Some(AgentId::from("auditor")),
            },
        );
        assert!(state.is_simulated("auditor"));
    }

    #[test]
    fn saving_checklist_is_cosmetic() {
        let agents = default_agents();
        let rows_before: Vec<_> = agents.iter().map(|a| a.rows.clone()).collect();
        let mut state = simulating("auditor");
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("auditor") });

        let len = state.checklist.as_ref().map_or(0, Checklist::len);
        assert_eq!(len, 5);
        for index in 0..len {
            apply(&mut state, &agents, UiEvent::ToggleChecklistItem { index });
        }
        assert!(state.checklist.as_ref().is_some_and(Checklist::save_enabled));
        apply(&mut state, &agents, UiEvent::SaveChecklist);

        let checklist = state.checklist.clone().unwrap_or_default();
        assert!(checklist.is_empty());
        assert_eq!(checklist.resolved(), 5);
        assert!(!checklist.save_enabled());

        // Source rows are untouched; reopening restores every item.
        let rows_after: Vec<_> = agents.iter().map(|a| a.rows.clone()).collect();
        assert_eq!(rows_before, rows_after);
        apply(&mut state, &agents, UiEvent::CloseModal);
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("auditor") });
        assert_eq!(state.checklist.as_ref().map(Checklist::len), Some(5));
    }

    #[test]
    fn partial_save_keeps_unchecked_items() {
        let agents = default_agents();
        let mut state = simulating("gabriel");
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("gabriel") });
        apply(&mut state, &agents, UiEvent::ToggleChecklistItem { index: 1 });
        apply(&mut state, &agents, UiEvent::SaveChecklist);

        let remaining: Vec<usize> = state
            .checklist
            .as_ref()
            .map(|c| c.entries().iter().map(|e| e.item.index).collect())
            .unwrap_or_default();
        assert_eq!(remaining, vec![0, 2, 3]);
    }

    #[test]
    fn save_without_checked_items_is_noop() {
        let mut checklist = Checklist::new(Vec::new());
        assert_eq!(checklist.save(), 0);
        assert!(checklist.is_empty());
        assert_eq!(checklist.resolved(), 0);
    }

    #[test]
    fn checklist_errors() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        let registry = AttentionRegistry::default();
        let result = state.apply(&agents, &registry, UiEvent::SaveChecklist);
        assert!(matches!(result, Err(CoreError::NoChecklist)));

        let mut state = simulating("leo");
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("leo") });
        let result = state.apply(&agents, &registry, UiEvent::ToggleChecklistItem { index: 9 });
        assert!(matches!(result, Err(CoreError::ChecklistIndex { index: 9, len: 2 })));
    }

    #[test]
    fn unknown_agent_is_rejected() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        let result = state.apply(&agents, &AttentionRegistry::default(), click("nobody"));
        assert!(matches!(result, Err(CoreError::UnknownAgent(_))));
        assert_eq!(state.selection, Selection::Idle);
    }

    #[test]
    fn toggling_simulation_off_clears_target() {
        let agents = default_agents();
        let mut state = simulating("nora");
        apply(&mut state, &agents, UiEvent::ToggleSimulation);
        assert!(!state.simulate_active);
        assert!(state.simulation_agent.is_none());
    }

    #[test]
    fn simulation_change_refreshes_open_modal() {
        let agents = default_agents();
        let mut state = DashboardState::new(JobRole::Admin, false, None);
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("leo") });
        apply(&mut state, &agents, UiEvent::ToggleMaximize);

        apply(&mut state, &agents, UiEvent::ToggleSimulation);
        apply(
            &mut state,
            &agents,
            UiEvent::ChooseSimulationAgent {
                agent: Some(AgentId::from("leo")),
            },
        );
        assert_eq!(
            state.selection,
            Selection::ModalOpen {
                agent: AgentId::from("leo"),
                simulated: true
            }
        );
        assert_eq!(state.checklist.as_ref().map(Checklist::len), Some(2));
        assert!(state.modal_maximized);

        // Re-choosing the same target keeps the ticks.
        apply(&mut state, &agents, UiEvent::ToggleChecklistItem { index: 0 });
        apply(
            &mut state,
            &agents,
            UiEvent::ChooseSimulationAgent {
                agent: Some(AgentId::from("leo")),
            },
        );
        assert!(state.checklist.as_ref().is_some_and(Checklist::save_enabled));

        apply(&mut state, &agents, UiEvent::ToggleSimulation);
        assert!(matches!(state.modal_view(&agents), Some(ModalView::Rows(a)) if a.id == "leo"));
        assert!(state.checklist.is_none());
    }

    #[test]
    fn maximize_only_with_open_modal() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        apply(&mut state, &agents, UiEvent::ToggleMaximize);
        assert!(!state.modal_maximized);
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("nora") });
        apply(&mut state, &agents, UiEvent::ToggleMaximize);
        assert!(state.modal_maximized);
        apply(&mut state, &agents, UiEvent::CloseModal);
        assert!(!state.modal_maximized);
    }

    #[test]
    fn center_click_toggles_mini_kpis_and_closes_modal() {
        let agents = default_agents();
        let mut state = DashboardState::default();
        apply(&mut state, &agents, UiEvent::OpenModal { agent: AgentId::from("nora") });
        apply(&mut state, &agents, UiEvent::CenterClicked);
        assert!(state.mini_kpis_visible);
        assert_eq!(state.selection, Selection::Idle);
        apply(&mut state, &agents, click("leo"));
        assert!(!state.mini_kpis_visible);
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let json = r#"{"type":"agent_clicked","agent":"nora"}"#;
        let event: Result<UiEvent, _> = serde_json::from_str(json);
        assert_eq!(event.ok(), Some(click("nora")));

        let json = r#"{"type":"choose_simulation_agent"}"#;
        let event: Result<UiEvent, _> = serde_json::from_str(json);
        assert_eq!(event.ok(), Some(UiEvent::ChooseSimulationAgent { agent: None }));
    }

    #[test]
    fn reset_keeps_job_role() {
        let agents = default_agents();
        let mut state = DashboardState::new(JobRole::Receptionist, true, Some(AgentId::from("leo")));
        apply(&mut state, &agents, UiEvent::ToggleChat);
        state.reset();
        assert_eq!(state, DashboardState::new(JobRole::Receptionist, false, None));
    }
}
