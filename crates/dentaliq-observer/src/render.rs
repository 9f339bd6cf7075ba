//! Server-side HTML rendering of the dashboard via `minijinja`.
//!
//! The markup lives in `.html` templates under `templates/`, compiled into
//! the binary. A template directory can override any of them so operators
//! can restyle the page without recompiling. Templates are named `*.html`,
//! so `minijinja` escapes every value they print.
//!
//! [`PageContext`] flattens the host payload, the dashboard state and the
//! chat log into the values the templates read. Rendering never mutates
//! state. Absent optional data (no rows, no KPIs, no tasks) renders an
//! explicit placeholder.

use std::fmt;
use std::path::Path;

use dentaliq_core::attention::PROBLEM_KEY;
use dentaliq_core::controller::{Checklist, ModalView, Selection};
use dentaliq_core::{DashboardState, visible_agents};
use dentaliq_types::{Agent, ChatMessage, HostPayload, Position, Speaker, UserInfo};
use minijinja::Environment;
use serde::Serialize;

/// Half the width and height of an agent icon, in CSS pixels.
const ICON_HALF: f64 = 60.0;

/// Template rendered for `GET /`.
pub const PAGE_TEMPLATE: &str = "page.html";

/// Built-in templates, by name.
const TEMPLATES: &[(&str, &str)] = &[
    ("page.html", include_str!("../templates/page.html")),
    ("header.html", include_str!("../templates/header.html")),
    ("config.html", include_str!("../templates/config.html")),
    ("agents.html", include_str!("../templates/agents.html")),
    ("popup.html", include_str!("../templates/popup.html")),
    ("mini_kpis.html", include_str!("../templates/mini_kpis.html")),
    ("kpis.html", include_str!("../templates/kpis.html")),
    ("modal.html", include_str!("../templates/modal.html")),
    ("checklist.html", include_str!("../templates/checklist.html")),
    ("chat.html", include_str!("../templates/chat.html")),
];

fn builtin(name: &str) -> Option<String> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| (*source).to_owned())
}

/// Everything one page render reads.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    /// The payload built for this load.
    pub payload: &'a HostPayload,
    /// Current dashboard state.
    pub dashboard: &'a DashboardState,
    /// One position per payload agent, in the same order.
    pub positions: &'a [Position],
    /// Chat log snapshot.
    pub chat: &'a [ChatMessage],
    /// Whether a chat reply is pending.
    pub typing: bool,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders dashboard pages from the `minijinja` templates.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRenderer").finish_non_exhaustive()
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PageRenderer {
    /// A renderer over the templates compiled into the binary.
    pub fn embedded() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| Ok(builtin(name)));
        Self { env }
    }

    /// A renderer that reads templates from `dir` first, falling back to
    /// the built-in template for any file the directory lacks.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        tracing::info!(dir = %dir.display(), "loading page templates from disk");
        let disk = minijinja::path_loader(dir);
        let mut env = Environment::new();
        env.set_loader(move |name| Ok(disk(name)?.or_else(|| builtin(name))));
        Self { env }
    }

    /// Render the full dashboard page.
    pub fn render_page(&self, view: &PageView<'_>) -> Result<String, minijinja::Error> {
        self.render(PAGE_TEMPLATE, &PageContext::from_view(view))
    }

    /// Render one template against a page context.
    pub fn render(&self, name: &str, context: &PageContext<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}

// ---------------------------------------------------------------------------
// Template context
// ---------------------------------------------------------------------------

/// The values the page templates read, built from a [`PageView`].
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    user: UserContext<'a>,
    show_welcome: bool,
    simulate_active: bool,
    simulation_options: Vec<SimulationOption<'a>>,
    user_menu_open: bool,
    config_panel_open: bool,
    agents: Vec<AgentContext<'a>>,
    mini_kpis_visible: bool,
    modal: Option<ModalContext<'a>>,
    chat_open: bool,
    chat: ChatContext<'a>,
}

#[derive(Debug, Serialize)]
struct UserContext<'a> {
    name: &'a str,
    user_id: &'a str,
    role_label: &'static str,
    is_admin: bool,
}

#[derive(Debug, Serialize)]
struct SimulationOption<'a> {
    id: String,
    name: &'a str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct KpiContext<'a> {
    label: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct MiniKpiContext<'a> {
    icon: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct TaskContext<'a> {
    task: &'a str,
    priority: &'a str,
    priority_class: &'static str,
    status: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AgentContext<'a> {
    id: &'a str,
    name: &'a str,
    role: &'a str,
    avatar_image: Option<&'a str>,
    avatar_emoji: &'a str,
    left: String,
    top: String,
    direction: &'static str,
    highlighted: bool,
    selected: bool,
    show_popup: bool,
    notification: Option<&'a str>,
    kpis: Vec<KpiContext<'a>>,
    mini_kpis: Vec<MiniKpiContext<'a>>,
    tasks: Vec<TaskContext<'a>>,
}

#[derive(Debug, Serialize)]
struct ModalContext<'a> {
    agent_id: &'a str,
    name: &'a str,
    role: &'a str,
    maximized: bool,
    kpis: Vec<KpiContext<'a>>,
    headers: Vec<&'a str>,
    rows: Vec<Vec<&'a str>>,
    checklist: Option<ChecklistContext<'a>>,
}

#[derive(Debug, Serialize)]
struct ChecklistContext<'a> {
    items: Vec<ChecklistItemContext<'a>>,
    save_enabled: bool,
    resolved: usize,
}

#[derive(Debug, Serialize)]
struct ChecklistItemContext<'a> {
    checked: bool,
    patient: &'a str,
    context: &'a str,
    problem: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatContext<'a> {
    messages: Vec<ChatLine<'a>>,
    typing: bool,
}

#[derive(Debug, Serialize)]
struct ChatLine<'a> {
    who: &'static str,
    text: &'a str,
}

impl<'a> PageContext<'a> {
    /// Flatten a page view into template values.
    pub fn from_view(view: &PageView<'a>) -> Self {
        let payload = view.payload;
        let dashboard = view.dashboard;
        let user = &payload.user_info;

        let simulation_options = if dashboard.simulate_active {
            simulation_options(payload, dashboard)
        } else {
            Vec::new()
        };

        Self {
            user: UserContext {
                name: &user.name,
                user_id: &user.user_id,
                role_label: role_label(user),
                is_admin: user.is_admin(),
            },
            show_welcome: payload.show_welcome,
            simulate_active: dashboard.simulate_active,
            simulation_options,
            user_menu_open: dashboard.user_menu_open,
            config_panel_open: dashboard.config_panel_open,
            agents: agent_contexts(view),
            mini_kpis_visible: dashboard.mini_kpis_visible,
            modal: modal_context(view.dashboard, &payload.agents),
            chat_open: dashboard.chat_open,
            chat: ChatContext {
                messages: view
                    .chat
                    .iter()
                    .map(|m| ChatLine {
                        who: match m.speaker {
                            Speaker::User => "user",
                            Speaker::Agent => "bot",
                        },
                        text: &m.text,
                    })
                    .collect(),
                typing: view.typing,
            },
        }
    }
}

/// CSS class for a task priority label.
pub fn priority_class(priority: &str) -> &'static str {
    match priority {
        "Vysoká" => "high",
        "Střední" => "medium",
        _ => "low",
    }
}

/// Label shown in the user menu for a user's account role.
pub fn role_label(user: &UserInfo) -> &'static str {
    if user.is_admin() {
        "Administrátor"
    } else {
        "Uživatel"
    }
}

/// The simulation-target dropdown, limited to agents the role may see.
fn simulation_options<'a>(payload: &'a HostPayload, dashboard: &DashboardState) -> Vec<SimulationOption<'a>> {
    visible_agents(dashboard.job_role, &payload.agents)
        .into_iter()
        .filter_map(|id| {
            let agent = payload.agent(id.as_str())?;
            Some(SimulationOption {
                selected: dashboard.simulation_agent.as_ref() == Some(&id),
                id: id.into_inner(),
                name: &agent.name,
            })
        })
        .collect()
}

fn kpis(agent: &Agent) -> Vec<KpiContext<'_>> {
    agent
        .kpis
        .iter()
        .map(|k| KpiContext {
            label: k.label(),
            value: k.value(),
        })
        .collect()
}

fn agent_contexts<'a>(view: &PageView<'a>) -> Vec<AgentContext<'a>> {
    let dashboard = view.dashboard;
    let popup_for = match &dashboard.selection {
        Selection::AgentSelected { agent } => Some(agent),
        Selection::Idle | Selection::ModalOpen { .. } => None,
    };

    view.payload
        .agents
        .iter()
        .zip(view.positions)
        .map(|(agent, pos)| {
            let highlighted = dashboard.is_simulated(agent.id.as_str());
            AgentContext {
                id: agent.id.as_str(),
                name: &agent.name,
                role: &agent.role,
                avatar_image: agent.has_image_avatar().then_some(agent.avatar.as_str()),
                avatar_emoji: if agent.avatar.is_empty() { "👤" } else { agent.avatar.as_str() },
                left: format!("{:.1}", pos.x - ICON_HALF),
                top: format!("{:.1}", pos.y - ICON_HALF),
                direction: pos.popup_direction.as_str(),
                highlighted,
                selected: dashboard.selection.agent() == Some(&agent.id),
                show_popup: !highlighted && popup_for == Some(&agent.id),
                notification: agent.notification.as_deref().filter(|n| !n.is_empty()),
                kpis: kpis(agent),
                mini_kpis: agent
                    .mini_kpis
                    .iter()
                    .map(|k| MiniKpiContext {
                        icon: k.icon(),
                        value: k.value(),
                    })
                    .collect(),
                tasks: agent
                    .simulation_tasks
                    .iter()
                    .map(|t| TaskContext {
                        task: &t.task,
                        priority: &t.priority,
                        priority_class: priority_class(&t.priority),
                        status: t.status.as_deref(),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// The open modal, with either the row table or the attention checklist.
///
/// Table headers come from the first row, minus the problem description
/// column.
fn modal_context<'a>(dashboard: &'a DashboardState, agents: &'a [Agent]) -> Option<ModalContext<'a>> {
    let (agent, checklist) = match dashboard.modal_view(agents)? {
        ModalView::Rows(agent) => (agent, None),
        ModalView::Checklist(agent, checklist) => (agent, Some(checklist_context(checklist))),
    };

    let (headers, rows) = match (&checklist, agent.rows.first()) {
        (None, Some(first)) => {
            let headers: Vec<&str> = first
                .keys()
                .map(String::as_str)
                .filter(|h| *h != PROBLEM_KEY)
                .collect();
            let rows: Vec<Vec<&str>> = agent
                .rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .map(|h| row.get(*h).map_or("", String::as_str))
                        .collect()
                })
                .collect();
            (headers, rows)
        }
        _ => (Vec::new(), Vec::new()),
    };

    Some(ModalContext {
        agent_id: agent.id.as_str(),
        name: &agent.name,
        role: &agent.role,
        maximized: dashboard.modal_maximized,
        kpis: kpis(agent),
        headers,
        rows,
        checklist,
    })
}

fn checklist_context(checklist: &Checklist) -> ChecklistContext<'_> {
    ChecklistContext {
        items: checklist
            .entries()
            .iter()
            .map(|entry| ChecklistItemContext {
                checked: entry.checked,
                patient: &entry.item.patient_name,
                context: &entry.item.context,
                problem: &entry.item.problem_description,
            })
            .collect(),
        save_enabled: checklist.save_enabled(),
        resolved: checklist.resolved(),
    }
}
