//! Terminal desk client entry point.
//!
//! Connects to a running dashboard host, renders the dashboard as text,
//! and reads one command per line from stdin. `Ctrl-C` cancels a pending
//! chat message; `quit` or end of input leaves the client.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, to stderr)
//! 2. Load configuration from environment variables
//! 3. Open local storage and load the first payload
//! 4. Run the command loop

use dentaliq_desk::app::HELP;
use dentaliq_desk::{Command, Desk, DeskConfig, DeskError, FileStorage, Flow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the first payload cannot
/// be loaded, or stdin fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging; stdout belongs to the dashboard.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    // Load configuration from environment
    let config = DeskConfig::from_env()?;
    info!(
        host_url = %config.host_url,
        storage_dir = %config.storage_dir.display(),
        chat_timeout_ms = config.chat_timeout.as_millis(),
        chat_max_polls = config.chat_max_polls,
        "configuration loaded"
    );

    let storage = FileStorage::open(&config.storage_dir);
    let mut desk = Desk::new(&config, storage)?;
    desk.load().await?;
    println!("{}", desk.render());
    println!("{HELP}");

    run(&mut desk).await?;
    info!("dentaliq-desk exiting");
    Ok(())
}

/// Read commands until `quit` or end of input.
async fn run(desk: &mut Desk<FileStorage>) -> Result<(), DeskError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e} (help: help)");
                continue;
            }
        };

        let cancel = CancellationToken::new();
        let outcome = {
            let step = desk.execute(command, &cancel);
            tokio::pin!(step);
            loop {
                tokio::select! {
                    outcome = &mut step => break outcome,
                    signal = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                        if let Err(e) = signal {
                            warn!(error = %e, "failed to listen for Ctrl-C");
                        }
                        cancel.cancel();
                    }
                }
            }
        };

        match outcome {
            Ok(Flow::Continue(text)) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Ok(Flow::Quit) => break,
            Err(e) => {
                warn!(error = %e, "command failed");
                println!("Chyba: {e}");
            }
        }
    }
    Ok(())
}
