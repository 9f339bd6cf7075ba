//! The desk client: typed commands driving a local dashboard.
//!
//! [`Desk`] holds the payload of the current load and a local
//! [`DashboardState`]. Clicks, modals, and the checklist run through the
//! shared reducer; simulation changes go to the host and trigger a
//! reload; chat goes through the remote backend; logout clears the
//! mirrored session and navigates to the logout URL.

use std::str::FromStr;

use dentaliq_chat::{ChatSession, SendOutcome};
use dentaliq_core::config::{ChatBackendKind, ChatConfig, LayoutConfig};
use dentaliq_core::{AttentionRegistry, DashboardState, UiEvent, layout};
use dentaliq_types::{AgentId, HostPayload};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::host::HostClient;
use crate::logout::{HttpNavigator, LogoutTarget, perform_logout};
use crate::storage::{Storage, mirror_session};
use crate::view::{TextView, render};

/// Help text listing every command.
pub const HELP: &str = "\
Příkazy:
  show                 překreslit dashboard
  click <agent>        kliknout na agenta
  open <agent>         otevřít detail agenta
  outside              kliknout mimo
  close                zavřít detail
  max                  maximalizovat / obnovit detail
  center               mini KPI
  sim on|off|<agent>   simulace
  check <n>            označit položku kontrolního seznamu
  save                 uložit kontrolní seznam
  chat                 otevřít / zavřít chat
  say <zpráva>         poslat zprávu Axelovi
  menu                 uživatelské menu
  config               konfigurace agentů (administrátor)
  logout               odhlásit se
  help                 tato nápověda
  quit                 ukončit";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// What the simulation command asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Turn simulation on, keeping the current target.
    On,
    /// Turn simulation off.
    Off,
    /// Turn simulation on and target one agent.
    Target(AgentId),
}

/// One line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Redraw.
    Show,
    /// Click an agent icon.
    Click(AgentId),
    /// Open an agent's detail modal.
    Open(AgentId),
    /// Click outside everything.
    Outside,
    /// Close the modal.
    Close,
    /// Toggle modal size.
    Maximize,
    /// Click the centre logo.
    Center,
    /// Change simulation mode.
    Simulation(SimulationCommand),
    /// Toggle a checklist entry (zero-based).
    Check(usize),
    /// Save the checklist.
    Save,
    /// Open or close the chat panel.
    ToggleChat,
    /// Send a chat message.
    Say(String),
    /// Open or close the user menu.
    Menu,
    /// Open or close the agent configuration panel.
    Config,
    /// Log out.
    Logout,
    /// Print help.
    Help,
    /// Leave the client.
    Quit,
}

impl Command {
    /// The reducer event this command maps to, if it is a pure UI event.
    pub fn ui_event(&self) -> Option<UiEvent> {
        let event = match self {
            Self::Click(agent) => UiEvent::AgentClicked {
                agent: agent.clone(),
            },
            Self::Open(agent) => UiEvent::OpenModal {
                agent: agent.clone(),
            },
            Self::Outside => UiEvent::OutsideClick,
            Self::Close => UiEvent::CloseModal,
            Self::Maximize => UiEvent::ToggleMaximize,
            Self::Center => UiEvent::CenterClicked,
            Self::Check(index) => UiEvent::ToggleChecklistItem { index: *index },
            Self::Save => UiEvent::SaveChecklist,
            Self::ToggleChat => UiEvent::ToggleChat,
            Self::Menu => UiEvent::ToggleUserMenu,
            Self::Config => UiEvent::ToggleConfigPanel,
            Self::Show
            | Self::Simulation(_)
            | Self::Say(_)
            | Self::Logout
            | Self::Help
            | Self::Quit => return None,
        };
        Some(event)
    }
}

impl FromStr for Command {
    type Err = DeskError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let agent = |what: &str| -> Result<AgentId, DeskError> {
            if rest.is_empty() {
                Err(DeskError::Command(format!("{what} needs an agent id")))
            } else {
                Ok(AgentId::from(rest.to_lowercase()))
            }
        };

        match word.to_lowercase().as_str() {
            "" | "show" => Ok(Self::Show),
            "click" | "c" => agent("click").map(Self::Click),
            "open" | "o" => agent("open").map(Self::Open),
            "outside" => Ok(Self::Outside),
            "close" => Ok(Self::Close),
            "max" => Ok(Self::Maximize),
            "center" => Ok(Self::Center),
            "sim" => match rest.to_lowercase().as_str() {
                "on" => Ok(Self::Simulation(SimulationCommand::On)),
                "off" => Ok(Self::Simulation(SimulationCommand::Off)),
                "" => Err(DeskError::Command("sim needs on, off, or an agent id".to_owned())),
                id => Ok(Self::Simulation(SimulationCommand::Target(AgentId::from(id)))),
            },
            "check" => rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Check)
                .ok_or_else(|| DeskError::Command(format!("check needs an item number, got {rest:?}"))),
            "save" => Ok(Self::Save),
            "chat" => Ok(Self::ToggleChat),
            "say" => Ok(Self::Say(rest.to_owned())),
            "menu" => Ok(Self::Menu),
            "config" => Ok(Self::Config),
            "logout" => Ok(Self::Logout),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(DeskError::Command(other.to_owned())),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the text and read the next command.
    Continue(String),
    /// Leave the client.
    Quit,
}

// ---------------------------------------------------------------------------
// Desk
// ---------------------------------------------------------------------------

/// The terminal dashboard.
#[derive(Debug)]
pub struct Desk<S> {
    host: HostClient,
    navigator: HttpNavigator,
    storage: S,
    chat: ChatSession,
    registry: AttentionRegistry,
    layout: LayoutConfig,
    payload: HostPayload,
    dashboard: DashboardState,
}

impl<S: Storage> Desk<S> {
    /// Build a client for the configured host. Call [`Desk::load`] next.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Chat`] if the remote chat backend rejects the
    /// host URL.
    pub fn new(config: &DeskConfig, storage: S) -> Result<Self, DeskError> {
        let chat_config = ChatConfig {
            backend: ChatBackendKind::Remote,
            request_timeout_ms: millis(config.chat_timeout),
            max_polls: config.chat_max_polls,
            poll_interval_ms: millis(config.chat_poll_interval),
            ..ChatConfig::default()
        };
        let chat = ChatSession::from_config(&chat_config, Some(config.host_url.as_str()))?;
        let host = HostClient::new(config.host_url.clone());
        let navigator = HttpNavigator::new(host.http());

        Ok(Self {
            host,
            navigator,
            storage,
            chat,
            registry: AttentionRegistry::default(),
            layout: LayoutConfig::default(),
            payload: HostPayload::default(),
            dashboard: DashboardState::default(),
        })
    }

    /// The payload of the current load.
    pub const fn payload(&self) -> &HostPayload {
        &self.payload
    }

    /// The local dashboard state.
    pub const fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    /// Layout constants reported by the host.
    pub const fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The local storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The chat session.
    pub const fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Fetch a fresh payload and the host's layout, and start a new page
    /// state from them.
    ///
    /// The chat panel stays as it was; everything else starts over, and
    /// the session is mirrored into local storage.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Host`] if the payload or layout cannot be fetched.
    pub async fn load(&mut self) -> Result<(), DeskError> {
        let payload = self.host.fetch_payload().await?;
        self.layout = self.host.fetch_layout().await?;
        self.install(payload);
        Ok(())
    }

    fn install(&mut self, payload: HostPayload) {
        let chat_open = self.dashboard.chat_open;
        self.dashboard = DashboardState::new(
            payload.user_info.job_role(),
            payload.simulate_active,
            payload.selected_agent_id(),
        );
        self.dashboard.chat_open = chat_open;

        let now_ms = chrono::Utc::now().timestamp_millis();
        mirror_session(&mut self.storage, &payload, now_ms);

        info!(
            agents = payload.agents.len(),
            simulate = payload.simulate_active,
            user = %payload.user_info.user_id,
            "payload loaded"
        );
        self.payload = payload;
    }

    /// Draw the current frame.
    pub fn render(&self) -> String {
        let positions = layout(&self.layout, &self.payload.agents);
        let chat = self.chat.messages();
        render(&TextView {
            payload: &self.payload,
            dashboard: &self.dashboard,
            positions: &positions,
            chat: &chat,
            typing: self.chat.is_typing(),
        })
    }

    /// Run one command.
    ///
    /// `cancel` aborts a pending chat exchange.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error for a rejected UI event (leaving the
    /// state untouched), and host errors for simulation and reload.
    pub async fn execute(&mut self, command: Command, cancel: &CancellationToken) -> Result<Flow, DeskError> {
        debug!(?command, "executing command");
        if let Some(event) = command.ui_event() {
            if matches!(command, Command::Config) && !self.payload.user_info.is_admin() {
                return Ok(Flow::Continue(
                    "Konfigurace agentů je dostupná pouze administrátorům.".to_owned(),
                ));
            }
            self.apply(event)?;
            return Ok(Flow::Continue(self.render()));
        }

        match command {
            Command::Simulation(sim) => {
                self.simulate(sim).await?;
                Ok(Flow::Continue(self.render()))
            }
            Command::Say(text) => {
                let reply = match self.chat.send(&text, cancel).await? {
                    SendOutcome::Ignored => return Ok(Flow::Continue(String::new())),
                    SendOutcome::Replied(reply) => reply,
                    SendOutcome::Failed(e) => e.user_message().to_owned(),
                };
                Ok(Flow::Continue(format!("Axel: {reply}")))
            }
            Command::Logout => {
                let target = self.logout().await?;
                let via = match target {
                    LogoutTarget::Top => "host",
                    LogoutTarget::Current => "local view",
                };
                Ok(Flow::Continue(format!("Odhlášeno ({via}).\n{}", self.render())))
            }
            Command::Help => Ok(Flow::Continue(HELP.to_owned())),
            Command::Quit => Ok(Flow::Quit),
            _ => Ok(Flow::Continue(self.render())),
        }
    }

    /// Apply a UI event to a copy, committing only on success.
    fn apply(&mut self, event: UiEvent) -> Result<(), DeskError> {
        let mut next = self.dashboard.clone();
        next.apply(&self.payload.agents, &self.registry, event)?;
        self.dashboard = next;
        Ok(())
    }

    async fn simulate(&mut self, command: SimulationCommand) -> Result<(), DeskError> {
        let (active, agent) = match command {
            SimulationCommand::Off => (false, None),
            SimulationCommand::On => (true, self.dashboard.simulation_agent.clone()),
            SimulationCommand::Target(id) => {
                // Validate against the visibility filter before asking the host.
                let mut trial = self.dashboard.clone();
                trial.simulate_active = true;
                trial.apply(
                    &self.payload.agents,
                    &self.registry,
                    UiEvent::ChooseSimulationAgent {
                        agent: Some(id.clone()),
                    },
                )?;
                (true, Some(id))
            }
        };

        self.host.set_simulation(active, agent.as_ref()).await?;
        info!(active, agent = ?agent, "simulation changed");
        self.load().await
    }

    async fn logout(&mut self) -> Result<LogoutTarget, DeskError> {
        let page = self.host.page_url().clone();
        let target = perform_logout(&mut self.storage, &mut self.navigator, &page).await?;
        self.chat.clear();

        if let Some(url) = self.navigator.take_reload() {
            debug!(url = %url, "reloading local view after logout");
            self.dashboard.reset();
        }
        self.load().await?;
        Ok(target)
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, DeskError> {
        line.parse()
    }

    #[test]
    fn parses_agent_commands() {
        assert_eq!(
            parse("click Leo").ok(),
            Some(Command::Click(AgentId::from("leo")))
        );
        assert_eq!(
            parse("  open   auditor ").ok(),
            Some(Command::Open(AgentId::from("auditor")))
        );
        assert!(matches!(parse("click"), Err(DeskError::Command(_))));
    }

    #[test]
    fn parses_simulation() {
        assert_eq!(
            parse("sim on").ok(),
            Some(Command::Simulation(SimulationCommand::On))
        );
        assert_eq!(
            parse("sim OFF").ok(),
            Some(Command::Simulation(SimulationCommand::Off))
        );
        assert_eq!(
            parse("sim gabriel").ok(),
            Some(Command::Simulation(SimulationCommand::Target(AgentId::from("gabriel"))))
        );
        assert!(parse("sim").is_err());
    }

    #[test]
    fn check_is_one_based() {
        assert_eq!(parse("check 1").ok(), Some(Command::Check(0)));
        assert_eq!(parse("check 3").ok(), Some(Command::Check(2)));
        assert!(parse("check 0").is_err());
        assert!(parse("check x").is_err());
    }

    #[test]
    fn say_keeps_message_text() {
        assert_eq!(
            parse("say Dobrý den, Axele").ok(),
            Some(Command::Say("Dobrý den, Axele".to_owned()))
        );
        assert_eq!(parse("say").ok(), Some(Command::Say(String::new())));
    }

    #[test]
    fn blank_line_redraws() {
        assert_eq!(parse("").ok(), Some(Command::Show));
        assert_eq!(parse("   ").ok(), Some(Command::Show));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(matches!(parse("dance"), Err(DeskError::Command(ref c)) if c == "dance"));
    }

    #[test]
    fn ui_events_map_one_to_one() {
        assert_eq!(Command::Outside.ui_event(), Some(UiEvent::OutsideClick));
        assert_eq!(
            Command::Check(4).ui_event(),
            Some(UiEvent::ToggleChecklistItem { index: 4 })
        );
        assert!(Command::Logout.ui_event().is_none());
        assert!(Command::Say("x".to_owned()).ui_event().is_none());
    }
}
