//! Configuration types for the desk client.
//!
//! All configuration is loaded from environment variables. The desk
//! client needs to know where the dashboard host lives, where to keep its
//! local storage, and how patient the chat should be.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::DeskError;

/// Complete desk configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// The dashboard page URL (e.g. `http://127.0.0.1:8501/`).
    pub host_url: Url,
    /// Directory holding the local storage file.
    pub storage_dir: PathBuf,
    /// Overall deadline for one chat exchange.
    pub chat_timeout: Duration,
    /// Maximum follow-up polls while the host answers `pending`.
    pub chat_max_polls: u32,
    /// Delay between chat polls.
    pub chat_poll_interval: Duration,
}

impl DeskConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DENTALIQ_URL` -- dashboard page URL (default `http://127.0.0.1:8501/`)
    /// - `DENTALIQ_STORAGE_DIR` -- local storage directory (default `.dentaliq`)
    /// - `CHAT_TIMEOUT_MS` -- chat deadline in milliseconds (default 20000)
    /// - `CHAT_MAX_POLLS` -- polls while pending (default 40)
    /// - `CHAT_POLL_INTERVAL_MS` -- delay between polls (default 500)
    pub fn from_env() -> Result<Self, DeskError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DeskError> {
        let raw_url = lookup("DENTALIQ_URL").unwrap_or_else(|| "http://127.0.0.1:8501/".to_owned());
        let host_url = Url::parse(&raw_url)
            .map_err(|e| DeskError::Config(format!("invalid DENTALIQ_URL {raw_url:?}: {e}")))?;

        let storage_dir =
            PathBuf::from(lookup("DENTALIQ_STORAGE_DIR").unwrap_or_else(|| ".dentaliq".to_owned()));

        let chat_timeout_ms: u64 = parse_var(&lookup, "CHAT_TIMEOUT_MS", "20000")?;
        let chat_max_polls: u32 = parse_var(&lookup, "CHAT_MAX_POLLS", "40")?;
        let chat_poll_interval_ms: u64 = parse_var(&lookup, "CHAT_POLL_INTERVAL_MS", "500")?;

        Ok(Self {
            host_url,
            storage_dir,
            chat_timeout: Duration::from_millis(chat_timeout_ms),
            chat_max_polls,
            chat_poll_interval: Duration::from_millis(chat_poll_interval_ms),
        })
    }
}

/// Parse an optional variable, using `default` when it is absent.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<T, DeskError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .unwrap_or_else(|| default.to_owned())
        .parse()
        .map_err(|e| DeskError::Config(format!("invalid {name}: {e}")))
}
