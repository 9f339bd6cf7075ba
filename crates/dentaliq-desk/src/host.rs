//! HTTP client for the dashboard host's JSON endpoints.

use dentaliq_core::config::LayoutConfig;
use dentaliq_types::{AgentId, HostPayload};
use reqwest::Url;
use tracing::debug;

use crate::error::DeskError;

/// Talks to one dashboard host.
#[derive(Debug, Clone)]
pub struct HostClient {
    client: reqwest::Client,
    page_url: Url,
}

impl HostClient {
    /// A client for the dashboard served at `page_url`.
    pub fn new(page_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            page_url,
        }
    }

    /// The dashboard page URL.
    pub const fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// The underlying HTTP client, for sharing with a navigator.
    pub fn http(&self) -> reqwest::Client {
        self.client.clone()
    }

    /// Fetch the payload for a fresh load.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Host`] on transport failure, a non-success
    /// status, or a body that is not a payload.
    pub async fn fetch_payload(&self) -> Result<HostPayload, DeskError> {
        self.get_json("api/payload")
            .await?
            .json::<HostPayload>()
            .await
            .map_err(|e| DeskError::Host(format!("invalid payload: {e}")))
    }

    /// Fetch the host's layout constants so positions match its page.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Host`] on transport failure, a non-success
    /// status, or a response without layout constants.
    pub async fn fetch_layout(&self) -> Result<LayoutConfig, DeskError> {
        let body = self
            .get_json("api/layout")
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DeskError::Host(format!("invalid layout: {e}")))?;
        let config = body
            .get("config")
            .cloned()
            .ok_or_else(|| DeskError::Host("layout response has no config".to_owned()))?;
        serde_json::from_value(config).map_err(|e| DeskError::Host(format!("invalid layout: {e}")))
    }

    async fn get_json(&self, path: &str) -> Result<reqwest::Response, DeskError> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "fetching from host");
        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DeskError::Host(e.to_string()))
    }

    /// Switch the host's simulation mode and target.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Host`] when the host rejects the request.
    pub async fn set_simulation(&self, active: bool, agent: Option<&AgentId>) -> Result<(), DeskError> {
        let url = self.endpoint("api/simulation")?;
        let body = serde_json::json!({ "active": active, "agent": agent });
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeskError::Host(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let reason = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
            .unwrap_or_else(|| status.to_string());
        Err(DeskError::Host(reason))
    }

    /// Resolve an API path against the page's origin.
    fn endpoint(&self, path: &str) -> Result<Url, DeskError> {
        self.page_url
            .join(&format!("/{path}"))
            .map_err(|e| DeskError::Config(format!("cannot build {path} url: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_use_page_origin() {
        let Ok(page) = Url::parse("http://dash.local:8501/app/?tab=1") else {
            return;
        };
        let client = HostClient::new(page);
        assert_eq!(
            client.endpoint("api/payload").map(String::from).ok().as_deref(),
            Some("http://dash.local:8501/api/payload")
        );
    }
}
