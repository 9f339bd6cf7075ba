//! End-to-end tests of the desk client against an in-process host.

#![allow(clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use dentaliq_core::DashboardConfig;
use dentaliq_core::config::{
    ChatBackendKind, ChatConfig, LayoutConfig, ServerConfig, SessionConfig, SimulationConfig,
};
use dentaliq_desk::app::SimulationCommand;
use dentaliq_desk::logout::LOGOUT_PARAM;
use dentaliq_desk::storage::{SESSION_KEY, SESSION_TOKEN_KEY, SessionRecord};
use dentaliq_desk::{Command, Desk, DeskConfig, DeskError, FileStorage, Flow, Storage};
use dentaliq_observer::{AppState, spawn_server};
use dentaliq_types::{AgentId, UserInfo};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

struct Harness {
    desk: Desk<FileStorage>,
    _dir: TempDir,
    shutdown: CancellationToken,
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn host_config(user: UserInfo) -> DashboardConfig {
    DashboardConfig {
        chat: ChatConfig {
            backend: ChatBackendKind::Echo,
            ..ChatConfig::default()
        },
        simulation: SimulationConfig {
            seed: Some(11),
            ..SimulationConfig::default()
        },
        session: SessionConfig {
            user,
            token: Some("tok-123".to_owned()),
            show_welcome: true,
        },
        ..DashboardConfig::default()
    }
}

fn admin() -> UserInfo {
    SessionConfig::default().user
}

async fn start_host(config: &DashboardConfig) -> (SocketAddr, CancellationToken) {
    let state = Arc::new(AppState::from_config(config).unwrap());
    let server = ServerConfig {
        host: "127.0.0.1".to_owned(),
        port: 0,
    };
    let shutdown = CancellationToken::new();
    let (addr, _handle) = spawn_server(&server, state, shutdown.clone()).await.unwrap();
    (addr, shutdown)
}

fn desk_for(addr: &str, dir: &TempDir) -> Desk<FileStorage> {
    let url = format!("http://{addr}/");
    let storage_dir = dir.path().to_string_lossy().into_owned();
    let config = DeskConfig::from_lookup(|name| match name {
        "DENTALIQ_URL" => Some(url.clone()),
        "DENTALIQ_STORAGE_DIR" => Some(storage_dir.clone()),
        "CHAT_TIMEOUT_MS" => Some("5000".to_owned()),
        _ => None,
    })
    .unwrap();
    Desk::new(&config, FileStorage::open(&config.storage_dir)).unwrap()
}

async fn harness(user: UserInfo) -> Harness {
    let (addr, shutdown) = start_host(&host_config(user)).await;
    let dir = tempfile::tempdir().unwrap();
    let mut desk = desk_for(&addr.to_string(), &dir);
    desk.load().await.unwrap();
    Harness {
        desk,
        _dir: dir,
        shutdown,
    }
}

async fn run(h: &mut Harness, line: &str) -> Result<Flow, DeskError> {
    let command: Command = line.parse()?;
    h.desk.execute(command, &CancellationToken::new()).await
}

fn rows_of(h: &Harness, id: &str) -> usize {
    h.desk
        .payload()
        .agent(id)
        .map_or(0, |agent| agent.rows.len())
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_load_mirrors_session() {
    let h = harness(admin()).await;

    assert_eq!(h.desk.payload().agents.len(), 5);
    assert!(h.desk.payload().show_welcome);
    assert_eq!(
        h.desk.storage().get(SESSION_TOKEN_KEY).as_deref(),
        Some("tok-123")
    );
    let record: SessionRecord =
        serde_json::from_str(&h.desk.storage().get(SESSION_KEY).unwrap()).unwrap();
    assert_eq!(record.user_id, "admin");
    assert_eq!(record.client_id, "client001");
    assert_eq!(record.token, "tok-123");
    assert!(record.timestamp > 0);
}

#[tokio::test]
async fn test_layout_follows_host() {
    let host_layout = LayoutConfig {
        center_x: 400.0,
        center_y: 300.0,
        radius: 150.0,
        ..LayoutConfig::default()
    };
    let config = DashboardConfig {
        layout: host_layout,
        ..host_config(admin())
    };
    let (addr, shutdown) = start_host(&config).await;
    let dir = tempfile::tempdir().unwrap();
    let mut desk = desk_for(&addr.to_string(), &dir);
    desk.load().await.unwrap();
    shutdown.cancel();

    assert_eq!(desk.layout(), &host_layout);
    // The first agent sits straight above the host's centre.
    assert!(desk.render().contains("@ (400, 150) top"));
}

#[tokio::test]
async fn test_click_flow_runs_locally() {
    let mut h = harness(admin()).await;

    run(&mut h, "click leo").await.unwrap();
    assert_eq!(
        h.desk.dashboard().selection.agent(),
        Some(&AgentId::from("leo"))
    );
    assert!(h.desk.render().contains("--- Leo"));

    run(&mut h, "click nora").await.unwrap();
    assert!(h.desk.dashboard().selection.is_modal_open());

    run(&mut h, "outside").await.unwrap();
    assert!(h.desk.dashboard().selection.agent().is_none());
}

#[tokio::test]
async fn test_rejected_event_leaves_state() {
    let mut h = harness(admin()).await;
    run(&mut h, "click leo").await.unwrap();

    let result = run(&mut h, "click ghost").await;
    assert!(matches!(result, Err(DeskError::Dashboard(_))));
    assert_eq!(
        h.desk.dashboard().selection.agent(),
        Some(&AgentId::from("leo"))
    );
}

#[tokio::test]
async fn test_simulation_reloads_with_extra_rows() {
    let mut h = harness(admin()).await;

    let command = Command::Simulation(SimulationCommand::Target(AgentId::from("gabriel")));
    h.desk.execute(command, &CancellationToken::new()).await.unwrap();

    assert!(h.desk.payload().simulate_active);
    assert_eq!(h.desk.payload().selected_agent, "gabriel");
    assert_eq!(rows_of(&h, "gabriel"), 8 + 12);
    assert_eq!(rows_of(&h, "leo"), 8);
    assert!(h.desk.dashboard().is_simulated("gabriel"));

    run(&mut h, "open gabriel").await.unwrap();
    assert!(h.desk.dashboard().checklist.is_some());
    assert!(h.desk.render().contains("Vyžaduje okamžitou pozornost"));

    run(&mut h, "sim off").await.unwrap();
    assert!(!h.desk.payload().simulate_active);
    assert_eq!(rows_of(&h, "gabriel"), 8);
}

#[tokio::test]
async fn test_checklist_toggle_and_save() {
    let mut h = harness(admin()).await;
    run(&mut h, "sim auditor").await.unwrap();
    run(&mut h, "open auditor").await.unwrap();

    let before = h.desk.dashboard().checklist.as_ref().map_or(0, |c| c.len());
    assert!(before > 0);

    run(&mut h, "check 1").await.unwrap();
    run(&mut h, "save").await.unwrap();
    let checklist = h.desk.dashboard().checklist.as_ref().unwrap();
    assert_eq!(checklist.len(), before.saturating_sub(1));
    assert_eq!(checklist.resolved(), 1);
}

#[tokio::test]
async fn test_hidden_agent_cannot_be_simulated() {
    let doctor = UserInfo {
        name: "Dr. Nováková".to_owned(),
        user_id: "doc1".to_owned(),
        role: "user".to_owned(),
        job_role: "doctor".to_owned(),
        client_id: None,
    };
    let mut h = harness(doctor).await;

    let result = run(&mut h, "sim isabella").await;
    assert!(matches!(result, Err(DeskError::Dashboard(_))));
    assert!(!h.desk.payload().simulate_active);

    // Doctors still reach the agents they may see.
    run(&mut h, "sim nora").await.unwrap();
    assert_eq!(h.desk.payload().selected_agent, "nora");

    // Client id falls back in the mirrored record.
    let record: SessionRecord =
        serde_json::from_str(&h.desk.storage().get(SESSION_KEY).unwrap()).unwrap();
    assert_eq!(record.client_id, "client001");
}

#[tokio::test]
async fn test_chat_goes_through_host() {
    let mut h = harness(admin()).await;

    let flow = run(&mut h, "say dobrý den").await.unwrap();
    assert_eq!(flow, Flow::Continue("Axel: Echo: dobrý den".to_owned()));
    assert_eq!(h.desk.chat().messages().len(), 2);

    let flow = run(&mut h, "say    ").await.unwrap();
    assert_eq!(flow, Flow::Continue(String::new()));
    assert_eq!(h.desk.chat().messages().len(), 2);
}

#[tokio::test]
async fn test_logout_resets_host_session() {
    let mut h = harness(admin()).await;
    run(&mut h, "sim leo").await.unwrap();
    run(&mut h, "say ahoj").await.unwrap();

    let flow = run(&mut h, "logout").await.unwrap();
    assert!(matches!(flow, Flow::Continue(ref text) if text.starts_with("Odhlášeno (host)")));
    assert!(!h.desk.payload().simulate_active);
    assert!(h.desk.chat().messages().is_empty());
    // The reload after logout mirrors the host's session again.
    assert_eq!(
        h.desk.storage().get(SESSION_TOKEN_KEY).as_deref(),
        Some("tok-123")
    );
}

#[tokio::test]
async fn test_config_panel_is_admin_only() {
    let user = UserInfo {
        role: "user".to_owned(),
        job_role: "receptionist".to_owned(),
        ..admin()
    };
    let mut h = harness(user).await;

    let flow = run(&mut h, "config").await.unwrap();
    assert!(matches!(flow, Flow::Continue(ref text) if text.contains("administrátor")));
    assert!(!h.desk.dashboard().config_panel_open);
}

#[tokio::test]
async fn test_quit_and_help() {
    let mut h = harness(admin()).await;
    assert_eq!(run(&mut h, "quit").await.unwrap(), Flow::Quit);
    assert!(matches!(run(&mut h, "help").await.unwrap(), Flow::Continue(ref t) if t.contains(LOGOUT_PARAM)));
}

#[tokio::test]
async fn test_unreachable_host() {
    let dir = tempfile::tempdir().unwrap();
    // Bind and drop to find a closed port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut desk = desk_for(&addr.to_string(), &dir);
    assert!(matches!(desk.load().await, Err(DeskError::Host(_))));
    assert!(desk.storage().get(SESSION_KEY).is_none());
}
