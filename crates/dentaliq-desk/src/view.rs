//! Plain-text rendering of the dashboard for the terminal.
//!
//! Mirrors what the host's HTML page shows: agents around the circle,
//! the selected agent's popup, the detail modal (row table or attention
//! checklist), mini KPIs, the menus, and the chat panel. Missing data
//! renders as a placeholder line.

use dentaliq_core::attention::PROBLEM_KEY;
use dentaliq_core::{Checklist, DashboardState, ModalView, Selection, visible_agents};
use dentaliq_types::{Agent, ChatMessage, HostPayload, Position, Speaker};

const NO_DATA: &str = "Žádná data";
const NO_KPIS: &str = "Žádné KPI";
const NO_TASKS: &str = "Žádné úkoly";
const SIMULATED_HEADER: &str = "🚨 Vyžaduje okamžitou pozornost";
const CHECKLIST_CLEAN: &str = "✅ Všechny položky jsou v pořádku, není potřeba žádná akce.";
const CHECKLIST_RESOLVED: &str = "✅ Všechny položky byly úspěšně zpracovány!";
const TYPING: &str = "Axel píše…";

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct TextView<'a> {
    /// The payload of the current load.
    pub payload: &'a HostPayload,
    /// The local dashboard state.
    pub dashboard: &'a DashboardState,
    /// Agent positions, parallel to `payload.agents`.
    pub positions: &'a [Position],
    /// The chat log.
    pub chat: &'a [ChatMessage],
    /// Whether a chat reply is pending.
    pub typing: bool,
}

/// Draw the whole dashboard.
pub fn render(view: &TextView<'_>) -> String {
    let payload = view.payload;
    let dashboard = view.dashboard;
    let user = &payload.user_info;
    let mut out = String::new();

    let role = if user.is_admin() { "Administrátor" } else { "Uživatel" };
    out.push_str(&format!("=== Dental IQ | {} ({role}) ===\n", display_name(&user.name)));
    if payload.show_welcome {
        out.push_str(&format!("👋 Vítejte, {}!\n", display_name(&user.name)));
    }
    out.push_str(&render_simulation(payload, dashboard));

    for (idx, (agent, pos)) in payload.agents.iter().zip(view.positions).enumerate() {
        out.push_str(&render_agent_line(idx, agent, pos, dashboard));
    }

    if dashboard.mini_kpis_visible {
        out.push_str(&render_mini_kpis(&payload.agents));
    }

    if let Some(agent) = popup_agent(payload, dashboard) {
        out.push_str(&render_popup(agent));
    }

    match dashboard.modal_view(&payload.agents) {
        Some(ModalView::Rows(agent)) => {
            out.push_str(&modal_header(agent, dashboard));
            out.push_str(&render_row_table(agent));
        }
        Some(ModalView::Checklist(agent, checklist)) => {
            out.push_str(&modal_header(agent, dashboard));
            out.push_str(&format!("{SIMULATED_HEADER}\n"));
            out.push_str(&render_checklist(checklist));
        }
        None => {}
    }

    if dashboard.user_menu_open {
        out.push_str(&format!(
            "--- {} ({}) ---\n  logout  Odhlásit se\n",
            display_name(&user.name),
            user.user_id
        ));
        if user.is_admin() {
            out.push_str("  config  Administrační panel\n");
        }
    }
    if dashboard.config_panel_open {
        out.push_str("--- Konfigurace agentů ---\n");
        for agent in &payload.agents {
            out.push_str(&format!("  {} ({})\n", agent.name, agent.role));
        }
    }

    if dashboard.chat_open {
        out.push_str(&render_chat(view.chat, view.typing));
    }
    out
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "Uživatel" } else { name }
}

fn render_simulation(payload: &HostPayload, dashboard: &DashboardState) -> String {
    if !dashboard.simulate_active {
        return "Simulace: vypnuta\n".to_owned();
    }
    let choices: Vec<String> = visible_agents(dashboard.job_role, &payload.agents)
        .into_iter()
        .map(|id| {
            if dashboard.simulation_agent.as_ref() == Some(&id) {
                format!("[{id}]")
            } else {
                id.into_inner()
            }
        })
        .collect();
    format!("Simulace: zapnuta | agenti: {}\n", choices.join(" "))
}

/// One agent: number, name, position, popup side, and badges.
pub fn render_agent_line(idx: usize, agent: &Agent, pos: &Position, dashboard: &DashboardState) -> String {
    let avatar = if agent.avatar.is_empty() || agent.avatar.starts_with("data:") {
        "👤"
    } else {
        agent.avatar.as_str()
    };
    let badge = if dashboard.is_simulated(agent.id.as_str()) { " [!]" } else { "" };
    let selected = if dashboard.selection.agent() == Some(&agent.id) { " *" } else { "" };
    let notification = agent
        .notification
        .as_deref()
        .filter(|n| !n.is_empty())
        .map(|n| format!(" ({n})"))
        .unwrap_or_default();
    format!(
        "{n:>2}. {avatar} {name} - {role} [{id}] @ ({x:.0}, {y:.0}) {dir}{notification}{badge}{selected}\n",
        n = idx.saturating_add(1),
        name = agent.name,
        role = agent.role,
        id = agent.id,
        x = pos.x,
        y = pos.y,
        dir = pos.popup_direction.as_str(),
    )
}

/// The popup is shown for a selected agent unless it is the simulated one.
fn popup_agent<'a>(payload: &'a HostPayload, dashboard: &DashboardState) -> Option<&'a Agent> {
    let Selection::AgentSelected { agent: id } = &dashboard.selection else {
        return None;
    };
    if dashboard.is_simulated(id.as_str()) {
        return None;
    }
    payload.agents.iter().find(|a| &a.id == id)
}

/// The popup of a selected agent: notification, KPIs, and tasks.
pub fn render_popup(agent: &Agent) -> String {
    let mut out = format!("--- {} - {} ---\n", agent.name, agent.role);
    if let Some(n) = agent.notification.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("  {n}\n"));
    }
    if agent.kpis.is_empty() {
        out.push_str(&format!("  {NO_KPIS}\n"));
    }
    for kpi in &agent.kpis {
        out.push_str(&format!("  {}: {}\n", kpi.0, kpi.1));
    }
    if agent.simulation_tasks.is_empty() {
        out.push_str(&format!("  {NO_TASKS}\n"));
    }
    for task in &agent.simulation_tasks {
        let status = task.status.as_deref().map(|s| format!(" ({s})")).unwrap_or_default();
        out.push_str(&format!("  [{}] {}{status}\n", task.priority, task.task));
    }
    out
}

fn render_mini_kpis(agents: &[Agent]) -> String {
    let mut out = String::from("--- Mini KPI ---\n");
    for agent in agents {
        let kpis: Vec<String> = agent
            .mini_kpis
            .iter()
            .map(|k| format!("{} {}", k.0, k.1))
            .collect();
        let kpis = if kpis.is_empty() { NO_KPIS.to_owned() } else { kpis.join("  ") };
        out.push_str(&format!("  {}: {kpis}\n", agent.name));
    }
    out
}

fn modal_header(agent: &Agent, dashboard: &DashboardState) -> String {
    let size = if dashboard.modal_maximized { " [max]" } else { "" };
    format!("=== {} - {}{size} ===\n", agent.name, agent.role)
}

/// The agent's rows as an aligned table, without the problem column.
pub fn render_row_table(agent: &Agent) -> String {
    let Some(first) = agent.rows.first() else {
        return format!("  {NO_DATA}\n");
    };
    let headers: Vec<&str> = first
        .keys()
        .map(String::as_str)
        .filter(|h| *h != PROBLEM_KEY)
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .map(|h| {
            agent
                .rows
                .iter()
                .filter_map(|row| row.get(*h))
                .map(|v| v.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        format!("  {}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(headers.clone());
    for row in &agent.rows {
        out.push_str(&line(
            headers
                .iter()
                .map(|h| row.get(*h).map_or("", String::as_str))
                .collect(),
        ));
    }
    out
}

/// The numbered attention checklist.
pub fn render_checklist(checklist: &Checklist) -> String {
    if checklist.is_empty() {
        let message = if checklist.resolved() > 0 {
            CHECKLIST_RESOLVED
        } else {
            CHECKLIST_CLEAN
        };
        return format!("  {message}\n");
    }

    let mut out = String::from("Položky vyžadující pozornost:\n");
    for (idx, entry) in checklist.entries().iter().enumerate() {
        let mark = if entry.checked { "x" } else { " " };
        let item = &entry.item;
        let parts: Vec<&str> = [
            item.patient_name.as_str(),
            item.context.as_str(),
            item.problem_description.as_str(),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
        out.push_str(&format!(
            "  {:>2}. [{mark}] {}\n",
            idx.saturating_add(1),
            parts.join(" | ")
        ));
    }
    let save = if checklist.save_enabled() { "save" } else { "save (nic nevybráno)" };
    out.push_str(&format!("  💾 Uložit změny: {save}\n"));
    out
}

/// The chat log and typing indicator.
pub fn render_chat(messages: &[ChatMessage], typing: bool) -> String {
    let mut out = String::from("--- Chat s Axelem ---\n");
    for message in messages {
        let who = match message.speaker {
            Speaker::User => "Vy",
            Speaker::Agent => "Axel",
        };
        out.push_str(&format!("  {who}: {}\n", message.text));
    }
    if typing {
        out.push_str(&format!("  {TYPING}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use dentaliq_core::config::LayoutConfig;
    use dentaliq_core::{AttentionRegistry, UiEvent, default_agents, layout};
    use dentaliq_types::{AgentId, JobRole};

    use super::*;

    fn payload() -> HostPayload {
        HostPayload {
            agents: default_agents(),
            show_welcome: true,
            ..HostPayload::default()
        }
    }

    fn frame(payload: &HostPayload, dashboard: &DashboardState, chat: &[ChatMessage], typing: bool) -> String {
        let positions = layout(&LayoutConfig::default(), &payload.agents);
        render(&TextView {
            payload,
            dashboard,
            positions: &positions,
            chat,
            typing,
        })
    }

    #[test]
    fn lists_every_agent_with_welcome() {
        let payload = payload();
        let text = frame(&payload, &DashboardState::default(), &[], false);
        assert!(text.contains("Vítejte"));
        assert!(text.contains("[isabella]"));
        assert!(text.contains("[auditor]"));
        assert!(text.contains("Simulace: vypnuta"));
        assert!(text.lines().any(|l| l.starts_with(" 1.") && l.contains(") top")));
    }

    #[test]
    fn selected_agent_shows_popup() {
        let payload = payload();
        let mut dashboard = DashboardState::default();
        let event = UiEvent::AgentClicked {
            agent: AgentId::from("leo"),
        };
        assert!(dashboard.apply(&payload.agents, &AttentionRegistry::default(), event).is_ok());
        let text = frame(&payload, &dashboard, &[], false);
        assert!(text.contains("--- Leo"));
    }

    #[test]
    fn simulated_modal_shows_checklist() {
        let payload = payload();
        let mut dashboard = DashboardState::new(JobRole::Admin, true, Some(AgentId::from("auditor")));
        let event = UiEvent::OpenModal {
            agent: AgentId::from("auditor"),
        };
        assert!(dashboard.apply(&payload.agents, &AttentionRegistry::default(), event).is_ok());
        let text = frame(&payload, &dashboard, &[], false);
        assert!(text.contains(SIMULATED_HEADER));
        assert!(text.contains(" 1. [ ]"));
        assert!(text.contains("[auditor]"));
    }

    #[test]
    fn row_table_hides_problem_column() {
        let agents = default_agents();
        let Some(leo) = agents.iter().find(|a| a.id == "leo") else {
            return;
        };
        let table = render_row_table(leo);
        assert!(!table.contains(PROBLEM_KEY));
        assert_eq!(table.lines().count(), leo.rows.len().saturating_add(1));
    }

    #[test]
    fn empty_agent_renders_placeholders() {
        let agent = Agent {
            id: AgentId::from("zoe"),
            name: "Zoe".to_owned(),
            role: "Testerka".to_owned(),
            avatar: String::new(),
            notification: None,
            kpis: Vec::new(),
            mini_kpis: Vec::new(),
            rows: Vec::new(),
            simulation_tasks: Vec::new(),
        };
        assert!(render_row_table(&agent).contains(NO_DATA));
        let popup = render_popup(&agent);
        assert!(popup.contains(NO_KPIS));
        assert!(popup.contains(NO_TASKS));
    }

    #[test]
    fn chat_panel_shows_typing() {
        let payload = payload();
        let dashboard = DashboardState {
            chat_open: true,
            ..DashboardState::default()
        };
        let log = [ChatMessage::user("ahoj"), ChatMessage::agent("Dobrý den")];
        let text = frame(&payload, &dashboard, &log, true);
        assert!(text.contains("Vy: ahoj"));
        assert!(text.contains("Axel: Dobrý den"));
        assert!(text.contains(TYPING));
    }

    #[test]
    fn empty_checklist_messages() {
        let clean = Checklist::new(Vec::new());
        assert!(render_checklist(&clean).contains(CHECKLIST_CLEAN));
    }
}
