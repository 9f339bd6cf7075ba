//! Identifier wrapper for dashboard agents.
//!
//! Agents are addressed by short, stable slugs supplied by the host
//! (`isabella`, `gabriel`, ...). Wrapping the slug keeps agent ids from
//! being mixed up with the other strings that flow through the dashboard
//! (names, roles, row values).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifier of an agent as supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct AgentId(pub String);

impl AgentId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for AgentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for AgentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AgentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        let id = AgentId::from("nora");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"nora\"");
    }

    #[test]
    fn compares_with_str() {
        let id = AgentId::new("leo");
        assert_eq!(id, "leo");
        assert_eq!(id.as_str(), "leo");
        assert_eq!(id.to_string(), "leo");
    }
}
