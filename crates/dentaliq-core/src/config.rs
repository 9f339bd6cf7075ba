//! Configuration loading and typed config structures for the Dental IQ
//! dashboard.
//!
//! The canonical configuration lives in `dentaliq-config.yaml` next to the
//! server binary. Every section and field is optional; missing values fall
//! back to the defaults below, so an empty file (or no file at all) yields
//! a working dashboard.

use std::path::{Path, PathBuf};

use dentaliq_types::UserInfo;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
///
/// Mirrors the structure of `dentaliq-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardConfig {
    /// HTTP host settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Circle layout constants.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Chat backend settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Simulated record generation.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// The user the host presents to the dashboard.
    #[serde(default)]
    pub session: SessionConfig,

    /// Directory of page templates overriding the built-in ones.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

impl DashboardConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `DENTALIQ_HOST` overrides `server.host`
    /// - `DENTALIQ_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Apply `DENTALIQ_HOST` / `DENTALIQ_PORT` overrides.
    ///
    /// A port override that does not parse is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DENTALIQ_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("DENTALIQ_PORT") {
            match val.parse() {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid DENTALIQ_PORT"),
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Constants of the circular agent layout, in CSS pixels and degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal centre of the circle.
    #[serde(default = "default_center")]
    pub center_x: f64,

    /// Vertical centre of the circle.
    #[serde(default = "default_center")]
    pub center_y: f64,

    /// Distance of every agent from the centre.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Angle of the first agent; `-90` is straight up.
    #[serde(default = "default_start_angle")]
    pub start_angle: f64,

    /// Half-width of the vertical band in which popups open top/bottom.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: default_center(),
            center_y: default_center(),
            radius: default_radius(),
            start_angle: default_start_angle(),
            dead_zone: default_dead_zone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Which response backend answers chat messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackendKind {
    /// Deterministic echo of the user's message.
    Echo,
    /// Random delay followed by a canned reply.
    #[default]
    Canned,
    /// HTTP GET against the host page with bounded polling.
    Remote,
}

/// Chat backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatConfig {
    /// Backend used by the host to answer `?chat_message=` requests.
    #[serde(default)]
    pub backend: ChatBackendKind,

    /// Lower bound of the canned reply delay.
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the canned reply delay.
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    /// Overall deadline for one exchange.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum number of follow-up polls after a `{pending: true}` answer.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,

    /// Delay between polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: ChatBackendKind::default(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_polls: default_max_polls(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Simulated record generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Rows appended to the simulated agent on every load.
    #[serde(default = "default_rows_per_load")]
    pub rows_per_load: usize,

    /// Rows appended to the auditor, which produces fewer records.
    #[serde(default = "default_auditor_rows_per_load")]
    pub auditor_rows_per_load: usize,

    /// Fixed seed for reproducible rows; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows_per_load: default_rows_per_load(),
            auditor_rows_per_load: default_auditor_rows_per_load(),
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The user and session the host hands to the dashboard.
///
/// Authentication happens outside the dashboard; the host is simply told
/// who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// The logged-in user.
    #[serde(default = "default_user")]
    pub user: UserInfo,

    /// Token the client mirrors into local storage.
    #[serde(default)]
    pub token: Option<String>,

    /// Greet the user on the first load after login.
    #[serde(default = "default_true")]
    pub show_welcome: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            token: None,
            show_welcome: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_port() -> u16 {
    8501
}

const fn default_center() -> f64 {
    325.0
}

const fn default_radius() -> f64 {
    220.0
}

const fn default_start_angle() -> f64 {
    -90.0
}

const fn default_dead_zone() -> f64 {
    50.0
}

const fn default_reply_delay_min_ms() -> u64 {
    600
}

const fn default_reply_delay_max_ms() -> u64 {
    1500
}

const fn default_request_timeout_ms() -> u64 {
    20_000
}

const fn default_max_polls() -> u32 {
    40
}

const fn default_poll_interval_ms() -> u64 {
    500
}

const fn default_rows_per_load() -> usize {
    12
}

const fn default_auditor_rows_per_load() -> usize {
    5
}

const fn default_true() -> bool {
    true
}

fn default_user() -> UserInfo {
    UserInfo {
        name: "Administrator".to_owned(),
        user_id: "admin".to_owned(),
        role: "admin".to_owned(),
        job_role: "admin".to_owned(),
        client_id: Some("client001".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use dentaliq_types::JobRole;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DashboardConfig::default();
        assert_eq!(config.server.port, 8501);
        assert!((config.layout.radius - 220.0).abs() < f64::EPSILON);
        assert_eq!(config.chat.backend, ChatBackendKind::Canned);
        assert_eq!(config.chat.max_polls, 40);
        assert_eq!(config.simulation.rows_per_load, 12);
        assert_eq!(config.session.user.job_role(), JobRole::Admin);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "0.0.0.0"
  port: 9000

layout:
  center_x: 400
  center_y: 300
  radius: 180
  start_angle: -90
  dead_zone: 40

chat:
  backend: echo
  reply_delay_min_ms: 10
  reply_delay_max_ms: 20
  request_timeout_ms: 1000
  max_polls: 3
  poll_interval_ms: 50

simulation:
  rows_per_load: 4
  auditor_rows_per_load: 2
  seed: 7

session:
  user:
    name: "Dr. Novák"
    user_id: "dr_novak"
    role: "user"
    job_role: "doctor"
    client_id: "clinic_dental"
  token: "abc123"
  show_welcome: false

templates_dir: /srv/dentaliq/templates
"#;

        let config = DashboardConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert!((config.layout.center_x - 400.0).abs() < f64::EPSILON);
        assert_eq!(config.chat.backend, ChatBackendKind::Echo);
        assert_eq!(config.chat.max_polls, 3);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.session.user.job_role(), JobRole::Doctor);
        assert_eq!(config.session.token.as_deref(), Some("abc123"));
        assert!(!config.session.show_welcome);
        assert_eq!(
            config.templates_dir.as_deref(),
            Some(Path::new("/srv/dentaliq/templates"))
        );
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let yaml = "layout:\n  radius: 100\n";
        let config = DashboardConfig::parse(yaml).unwrap_or_default();
        assert!((config.layout.radius - 100.0).abs() < f64::EPSILON);
        assert!((config.layout.center_x - 325.0).abs() < f64::EPSILON);
        assert_eq!(config.chat, ChatConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = DashboardConfig::parse("").unwrap_or_default();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.simulation, SimulationConfig::default());
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = DashboardConfig::parse("layout: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn from_file_reads_yaml() {
        let file = tempfile::NamedTempFile::new();
        assert!(file.is_ok());
        let Ok(mut file) = file else { return };
        let written = file.write_all(b"simulation:\n  rows_per_load: 3\n");
        assert!(written.is_ok());

        let config = DashboardConfig::from_file(file.path());
        assert!(config.is_ok());
        assert_eq!(config.map(|c| c.simulation.rows_per_load).ok(), Some(3));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = DashboardConfig::from_file(Path::new("/nonexistent/dentaliq-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
