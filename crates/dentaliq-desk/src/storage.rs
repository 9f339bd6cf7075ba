//! Local key-value storage and the session mirror.
//!
//! The desk client keeps a small string map on disk, the terminal analogue
//! of browser local storage. After every payload load the session is
//! mirrored into it under two keys so other local tools can pick up the
//! logged-in user. Storage failures are logged and never interrupt the
//! client.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dentaliq_types::HostPayload;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DeskError;

/// Key holding the JSON session record.
pub const SESSION_KEY: &str = "dental_iq_session";

/// Key holding the raw session token.
pub const SESSION_TOKEN_KEY: &str = "dental_iq_session_token";

/// Client id reported when the host does not supply one.
pub const DEFAULT_CLIENT_ID: &str = "client001";

const STORE_FILE: &str = "local-storage.json";

/// A string key-value store.
pub trait Storage {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), DeskError>;

    /// Delete a value. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), DeskError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// A [`Storage`] persisted as one JSON file inside a directory.
///
/// Every write rewrites the file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open (or start) the store inside `dir`.
    ///
    /// An unreadable or corrupt file is logged and treated as empty.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORE_FILE);
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "local storage is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "local storage unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), DeskError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                DeskError::Storage(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)
            .map_err(|e| DeskError::Storage(format!("cannot write {}: {e}", self.path.display())))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DeskError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), DeskError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session mirror
// ---------------------------------------------------------------------------

/// The JSON record stored under [`SESSION_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The logged-in user's id.
    pub user_id: String,
    /// The practice the user belongs to.
    pub client_id: String,
    /// The session token.
    pub token: String,
    /// Milliseconds since the Unix epoch at which the record was written.
    pub timestamp: i64,
}

/// Mirror the payload's session into `storage`.
///
/// Writes only when the payload names a user and carries a token. Returns
/// whether both keys were written; failures are logged and swallowed.
pub fn mirror_session(storage: &mut impl Storage, payload: &HostPayload, now_ms: i64) -> bool {
    let user = &payload.user_info;
    let Some(token) = payload.session_token.as_deref().filter(|t| !t.is_empty()) else {
        return false;
    };
    if user.user_id.is_empty() {
        return false;
    }

    let record = SessionRecord {
        user_id: user.user_id.clone(),
        client_id: user
            .client_id
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_owned()),
        token: token.to_owned(),
        timestamp: now_ms,
    };

    let result = serde_json::to_string(&record)
        .map_err(DeskError::from)
        .and_then(|json| storage.set(SESSION_KEY, &json))
        .and_then(|()| storage.set(SESSION_TOKEN_KEY, token));

    match result {
        Ok(()) => {
            tracing::debug!(user = %record.user_id, "session mirrored to local storage");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to mirror session to local storage");
            false
        }
    }
}

/// Remove both session keys, logging failures.
pub fn clear_session(storage: &mut impl Storage) {
    for key in [SESSION_KEY, SESSION_TOKEN_KEY] {
        if let Err(e) = storage.remove(key) {
            warn!(key, error = %e, "failed to clear local storage key");
        }
    }
}

#[cfg(test)]
mod tests {
    use dentaliq_types::UserInfo;

    use super::*;

    /// A store whose writes always fail.
    #[derive(Default)]
    struct FullStorage;

    impl Storage for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), DeskError> {
            Err(DeskError::Storage("quota exceeded".to_owned()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), DeskError> {
            Err(DeskError::Storage("denied".to_owned()))
        }
    }

    fn payload(token: Option<&str>, client_id: Option<&str>) -> HostPayload {
        HostPayload {
            user_info: UserInfo {
                name: "Jana".to_owned(),
                user_id: "jana".to_owned(),
                role: "user".to_owned(),
                job_role: "receptionist".to_owned(),
                client_id: client_id.map(str::to_owned),
            },
            session_token: token.map(str::to_owned),
            ..HostPayload::default()
        }
    }

    #[test]
    fn mirror_writes_both_keys() {
        let Ok(dir) = tempfile::tempdir() else {
            return;
        };
        let mut store = FileStorage::open(dir.path());
        assert!(mirror_session(&mut store, &payload(Some("tok-1"), None), 1_700_000_000_000));

        assert_eq!(store.get(SESSION_TOKEN_KEY).as_deref(), Some("tok-1"));
        let record: Option<SessionRecord> = store
            .get(SESSION_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        assert_eq!(
            record,
            Some(SessionRecord {
                user_id: "jana".to_owned(),
                client_id: DEFAULT_CLIENT_ID.to_owned(),
                token: "tok-1".to_owned(),
                timestamp: 1_700_000_000_000,
            })
        );

        // Survives a reopen.
        let reopened = FileStorage::open(dir.path());
        assert_eq!(reopened.get(SESSION_TOKEN_KEY).as_deref(), Some("tok-1"));
    }

    #[test]
    fn mirror_keeps_explicit_client_id() {
        let Ok(dir) = tempfile::tempdir() else {
            return;
        };
        let mut store = FileStorage::open(dir.path());
        assert!(mirror_session(&mut store, &payload(Some("t"), Some("clinic42")), 1));
        assert!(store.get(SESSION_KEY).is_some_and(|raw| raw.contains("clinic42")));
    }

    #[test]
    fn mirror_requires_token_and_user() {
        let Ok(dir) = tempfile::tempdir() else {
            return;
        };
        let mut store = FileStorage::open(dir.path());
        assert!(!mirror_session(&mut store, &payload(None, None), 1));
        assert!(!mirror_session(&mut store, &payload(Some(""), None), 1));

        let mut anonymous = payload(Some("t"), None);
        anonymous.user_info.user_id.clear();
        assert!(!mirror_session(&mut store, &anonymous, 1));
        assert!(store.get(SESSION_KEY).is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn storage_failure_is_swallowed() {
        let mut store = FullStorage;
        assert!(!mirror_session(&mut store, &payload(Some("t"), None), 1));
        clear_session(&mut store);
    }

    #[test]
    fn clear_removes_both_keys() {
        let Ok(dir) = tempfile::tempdir() else {
            return;
        };
        let mut store = FileStorage::open(dir.path());
        assert!(mirror_session(&mut store, &payload(Some("t"), None), 1));
        clear_session(&mut store);
        assert!(store.get(SESSION_KEY).is_none());
        assert!(store.get(SESSION_TOKEN_KEY).is_none());
        assert!(FileStorage::open(dir.path()).get(SESSION_KEY).is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let Ok(dir) = tempfile::tempdir() else {
            return;
        };
        assert!(std::fs::write(dir.path().join(STORE_FILE), "{not json").is_ok());
        let store = FileStorage::open(dir.path());
        assert!(store.get(SESSION_KEY).is_none());
    }
}
