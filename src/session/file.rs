//! File-backed session store using local JSON storage.
//!
//! Persists the session as a single JSON document with the
//! `accessToken` / `refreshToken` / `user` keys under the platform
//! config directory.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use super::{Session, SessionStore};
use crate::error::SessionError;

/// Session file name.
const SESSION_FILE: &str = "session.json";

/// Session store backed by a JSON file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the platform default location.
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn new() -> Option<Self> {
        let dirs = ProjectDirs::from("com", "policyport", "policyport")?;
        Some(Self {
            path: dirs.config_dir().join(SESSION_FILE),
        })
    }

    /// Create a store at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Where the session is persisted.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SessionError::ReadFailed(e.to_string()))?;

        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt session file means "signed out", not a hard error.
                warn!("Discarding unreadable session file: {}", e);
                Ok(None)
            }
        }
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SessionError::StoreFailed(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::StoreFailed(e.to_string()))?;

        fs::write(&self.path, content).map_err(|e| SessionError::StoreFailed(e.to_string()))?;

        debug!("Saved session to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::ClearFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{test_user, Role};

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_path(dir.path().join(SESSION_FILE));
        (dir, store)
    }

    #[test]
    fn test_roundtrip() {
        let (_dir, store) = temp_store();
        assert!(store.get().unwrap().is_none());

        let session = Session::new("acc".into(), Some("ref".into()), test_user(&[Role::Dealer]));
        store.set(&session).unwrap();

        let loaded = store.get().unwrap().unwrap();
        assert_eq!(loaded, session);

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let (_dir, store) = temp_store();
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_signed_out() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_persisted_keys_match_storage_contract() {
        let (_dir, store) = temp_store();
        let session = Session::new("acc".into(), Some("ref".into()), test_user(&[Role::Admin]));
        store.set(&session).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("accessToken").is_some());
        assert!(value.get("refreshToken").is_some());
        assert!(value.get("user").is_some());
    }
}
