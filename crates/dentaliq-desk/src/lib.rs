//! Terminal desk client for the Dental IQ dashboard.
//!
//! Loads the host payload, drives the shared dashboard reducer locally,
//! sends chat through the remote backend, mirrors the session into local
//! storage, and performs logout.
//!
//! # Modules
//!
//! - [`app`] -- Command parsing and the [`Desk`](app::Desk) controller.
//! - [`config`] -- Environment-based configuration.
//! - [`error`] -- Error types.
//! - [`host`] -- HTTP client for the host's JSON endpoints.
//! - [`logout`] -- Logout URL and top/current window navigation.
//! - [`storage`] -- Local key-value storage and the session mirror.
//! - [`view`] -- Plain-text rendering.

pub mod app;
pub mod config;
pub mod error;
pub mod host;
pub mod logout;
pub mod storage;
pub mod view;

pub use app::{Command, Desk, Flow};
pub use config::DeskConfig;
pub use error::DeskError;
pub use storage::{FileStorage, Storage};
