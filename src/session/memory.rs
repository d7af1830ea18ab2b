//! In-memory session store for tests and headless embedding.

use std::sync::RwLock;

use super::{Session, SessionStore};
use crate::error::SessionError;

/// Session store backed by process memory. Cheap to construct, never
/// touches disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Option<Session>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SessionError::ReadFailed("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SessionError::StoreFailed("lock poisoned".into()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SessionError::ClearFailed("lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{test_user, Role};

    #[test]
    fn test_set_get_clear() {
        let store = MemoryStore::new();
        assert!(store.get().unwrap().is_none());

        let session = Session::new("acc".into(), Some("ref".into()), test_user(&[Role::Admin]));
        store.set(&session).unwrap();
        assert_eq!(store.get().unwrap(), Some(session));

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());

        // Clearing an already-empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_last_writer_wins() {
        let store = MemoryStore::new();
        let first = Session::new("acc-1".into(), None, test_user(&[Role::Customer]));
        let second = Session::new("acc-2".into(), None, test_user(&[Role::Customer]));

        store.set(&first).unwrap();
        store.set(&second).unwrap();

        assert_eq!(store.get().unwrap().unwrap().access_token, "acc-2");
    }
}
