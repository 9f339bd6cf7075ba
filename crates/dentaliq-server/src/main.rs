//! Dashboard host binary for Dental IQ.
//!
//! Loads configuration, initializes logging, builds the shared host state
//! over the default roster, and serves the dashboard until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `dentaliq-config.yaml` (or `DENTALIQ_CONFIG`)
//! 3. Build the host state (roster, payload builder, chat session)
//! 4. Serve until `Ctrl-C`

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dentaliq_core::DashboardConfig;
use dentaliq_observer::AppState;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::HostError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "dentaliq-config.yaml";

/// Application entry point for the dashboard host.
///
/// # Errors
///
/// Returns an error if configuration loading or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("dentaliq-server starting");

    // 2. Load configuration.
    let path = config_path();
    let config = load_config(&path)?;
    info!(
        path = %path.display(),
        host = %config.server.host,
        port = config.server.port,
        chat_backend = ?config.chat.backend,
        job_role = %config.session.user.job_role,
        "Configuration loaded"
    );

    // 3. Build shared host state.
    let state = Arc::new(AppState::from_config(&config).map_err(HostError::from)?);
    info!(
        agents = state.payload.roster().len(),
        "Host state initialized"
    );

    // 4. Serve until Ctrl-C.
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl-C received, shutting down"),
                Err(e) => tracing::warn!(error = %e, "failed to listen for Ctrl-C"),
            }
            shutdown.cancel();
        });
    }

    dentaliq_observer::start_server(&config.server, state, shutdown)
        .await
        .map_err(HostError::from)?;

    info!("dentaliq-server shutdown complete");
    Ok(())
}

/// The configuration path: `DENTALIQ_CONFIG` or the default file name.
fn config_path() -> PathBuf {
    std::env::var_os("DENTALIQ_CONFIG").map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist. Environment overrides apply either way.
fn load_config(path: &Path) -> Result<DashboardConfig, HostError> {
    if path.exists() {
        Ok(DashboardConfig::from_file(path)?)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        Ok(DashboardConfig::parse("")?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use dentaliq_core::config::ChatBackendKind;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        if let Ok(dir) = dir {
            let config = load_config(&dir.path().join("absent.yaml"));
            assert!(matches!(config, Ok(ref c) if c.layout.radius > 219.0));
        }
    }

    #[test]
    fn file_values_are_used() {
        let file = tempfile::NamedTempFile::new();
        assert!(file.is_ok());
        if let Ok(mut file) = file {
            assert!(writeln!(file, "chat:\n  backend: echo\nlayout:\n  radius: 200").is_ok());
            let config = load_config(file.path());
            assert!(matches!(
                config,
                Ok(ref c) if c.chat.backend == ChatBackendKind::Echo && c.layout.radius < 201.0
            ));
        }
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = tempfile::NamedTempFile::new();
        if let Ok(mut file) = file {
            assert!(writeln!(file, "layout: [unclosed").is_ok());
            assert!(matches!(load_config(file.path()), Err(HostError::Config { .. })));
        }
    }
}
