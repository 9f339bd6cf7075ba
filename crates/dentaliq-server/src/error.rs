//! Error types for the dashboard host binary.
//!
//! [`HostError`] is the top-level error type that wraps all possible
//! failure modes during startup and serving.

/// Top-level error for the dashboard host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: dentaliq_core::ConfigError,
    },

    /// The chat backend could not be built.
    #[error("chat error: {source}")]
    Chat {
        /// The underlying chat error.
        #[from]
        source: dentaliq_chat::ChatError,
    },

    /// The HTTP host failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: dentaliq_observer::ServerError,
    },
}
