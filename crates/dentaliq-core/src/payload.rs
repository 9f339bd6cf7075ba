//! Per-load host payload assembly.
//!
//! The roster is immutable. Each load clones it and, when simulation is
//! active with a target chosen, appends freshly simulated rows to that one
//! agent. Nothing generated here is kept between loads.

use dentaliq_types::{Agent, AgentId, AgentKind, HostPayload};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{SessionConfig, SimulationConfig};
use crate::simulator::DataSimulator;

/// Builds the [`HostPayload`] handed to the dashboard on every load.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    roster: Vec<Agent>,
    simulation: SimulationConfig,
    session: SessionConfig,
}

impl PayloadBuilder {
    /// Create a builder over `roster`.
    pub const fn new(roster: Vec<Agent>, simulation: SimulationConfig, session: SessionConfig) -> Self {
        Self {
            roster,
            simulation,
            session,
        }
    }

    /// The immutable roster.
    pub fn roster(&self) -> &[Agent] {
        &self.roster
    }

    /// The session the payload reports.
    pub const fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Number of rows simulated per load for `kind`.
    pub const fn rows_for(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Auditor => self.simulation.auditor_rows_per_load,
            AgentKind::Other => 0,
            _ => self.simulation.rows_per_load,
        }
    }

    /// Assemble the payload for one load.
    pub fn build(
        &self,
        simulate_active: bool,
        selected_agent: Option<&AgentId>,
        show_welcome: bool,
    ) -> HostPayload {
        let mut agents = self.roster.clone();

        if simulate_active
            && let Some(selected) = selected_agent
            && let Some(agent) = agents.iter_mut().find(|a| &a.id == selected)
        {
            let kind = agent.kind();
            let mut rng = self.rng();
            let extra = DataSimulator.simulate(kind, self.rows_for(kind), &mut rng);
            tracing::debug!(agent = %agent.id, rows = extra.len(), "appending simulated rows");
            agent.rows.extend(extra);
        }

        HostPayload {
            agents,
            simulate_active,
            selected_agent: selected_agent.map(ToString::to_string).unwrap_or_default(),
            user_info: self.session.user.clone(),
            show_welcome,
            session_token: self.session.token.clone(),
        }
    }

    fn rng(&self) -> StdRng {
        match self.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
