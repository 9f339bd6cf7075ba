//! Chat panel support for the Dental IQ dashboard.
//!
//! A [`ChatSession`] keeps the message log and enforces that only one
//! exchange is in flight. Replies come from a [`ChatBackend`]: a
//! deterministic echo, a canned assistant reply after a random delay, or a
//! remote `GET ?chat_message=` against the dashboard host with bounded
//! polling.
//!
//! # Modules
//!
//! - [`backend`] -- Enum-dispatched reply backends.
//! - [`error`] -- Chat error type and localized failure messages.
//! - [`session`] -- The single-flight session and its typing guard.

pub mod backend;
pub mod error;
pub mod session;

pub use backend::{CannedBackend, ChatBackend, EchoBackend, RemoteBackend};
pub use error::ChatError;
pub use session::{ChatSession, SendOutcome};
