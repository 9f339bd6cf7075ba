//! Logout: clear the mirrored session and navigate to the logout URL.
//!
//! Navigation first targets the outer ("top") window, which for the desk
//! client is the dashboard host itself. If that fails the client falls
//! back to navigating its own view.

use std::future::Future;

use reqwest::Url;
use tracing::{info, warn};

use crate::error::DeskError;
use crate::storage::{Storage, clear_session};

/// Query parameter that asks the host to reset the session.
pub const LOGOUT_PARAM: &str = "logout";

/// The page URL with `logout=true` set, keeping every other parameter.
pub fn logout_url(page: &Url) -> Url {
    let mut url = page.clone();
    let kept: Vec<(String, String)> = page
        .query_pairs()
        .filter(|(k, _)| k != LOGOUT_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(LOGOUT_PARAM, "true");
    url
}

/// Something that can load a URL in the top or the current window.
pub trait Navigator {
    /// Load `url` in the top window.
    fn navigate_top(&mut self, url: &Url) -> impl Future<Output = Result<(), DeskError>> + Send;

    /// Load `url` in the current window.
    fn navigate_current(&mut self, url: &Url) -> Result<(), DeskError>;
}

/// Which window ended up loading the logout URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutTarget {
    /// The top window.
    Top,
    /// The current window, after the top window failed.
    Current,
}

/// Clear the mirrored session and navigate to the logout URL.
///
/// # Errors
///
/// Returns [`DeskError::Navigation`] only when both windows fail.
pub async fn perform_logout(
    storage: &mut impl Storage,
    navigator: &mut impl Navigator,
    page: &Url,
) -> Result<LogoutTarget, DeskError> {
    clear_session(storage);
    let url = logout_url(page);

    match navigator.navigate_top(&url).await {
        Ok(()) => {
            info!(url = %url, "logged out via top window");
            Ok(LogoutTarget::Top)
        }
        Err(top) => {
            warn!(error = %top, "top window navigation failed, using current window");
            navigator.navigate_current(&url).map_err(|current| {
                DeskError::Navigation(format!("top: {top}; current: {current}"))
            })?;
            info!(url = %url, "logged out via current window");
            Ok(LogoutTarget::Current)
        }
    }
}

// ---------------------------------------------------------------------------
// HTTP navigator
// ---------------------------------------------------------------------------

/// Navigates by requesting the URL from the host.
///
/// The current window is the desk's own view: navigating it records the
/// URL so the caller reloads from scratch.
#[derive(Debug, Clone, Default)]
pub struct HttpNavigator {
    client: reqwest::Client,
    reload: Option<Url>,
}

impl HttpNavigator {
    /// A navigator sharing `client`.
    pub const fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            reload: None,
        }
    }

    /// The URL the current window was sent to, if any. Clears it.
    pub fn take_reload(&mut self) -> Option<Url> {
        self.reload.take()
    }
}

impl Navigator for HttpNavigator {
    fn navigate_top(&mut self, url: &Url) -> impl Future<Output = Result<(), DeskError>> + Send {
        let request = self.client.get(url.clone());
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| DeskError::Navigation(e.to_string()))?;
            if response.status().is_success() {
                Ok(())
            } else {
                Err(DeskError::Navigation(format!("host answered {}", response.status())))
            }
        }
    }

    fn navigate_current(&mut self, url: &Url) -> Result<(), DeskError> {
        self.reload = Some(url.clone());
        Ok(())
    }
}
