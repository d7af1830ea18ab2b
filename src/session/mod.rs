//! Session model and the injectable session store.
//!
//! The portal keeps exactly one session per client: created on login,
//! rotated on token refresh, destroyed on logout or fatal auth failure.
//! Storage is behind the `SessionStore` trait so the pipeline can run
//! against browser-local storage, a file, or plain memory in tests.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SessionError;

/// Portal roles. A user may hold more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dealer,
    Customer,
    Observer,
}

/// The signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalUser {
    pub id: Uuid,
    pub user_name: String,
    pub roles: Vec<Role>,
}

impl PortalUser {
    /// Whether the user holds a role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The role that decides the post-login dashboard. First role wins.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }
}

/// One client session. Token fields are wiped from memory on drop.
///
/// Serialized field names (`accessToken`, `refreshToken`, `user`) are the
/// persisted-storage contract; `FileStore` writes them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    /// Absent when the backend issued no refresh credential; a 401 then
    /// forces a fresh login instead of a refresh attempt.
    pub refresh_token: Option<String>,
    #[zeroize(skip)]
    pub user: PortalUser,
    /// When the tokens were last issued or rotated.
    #[zeroize(skip)]
    pub refreshed_at: DateTime<Utc>,
}

impl Session {
    /// Create a session from a freshly issued token pair.
    pub fn new(access_token: String, refresh_token: Option<String>, user: PortalUser) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
            refreshed_at: Utc::now(),
        }
    }

    /// Apply a refreshed token pair.
    ///
    /// Fields the backend omitted keep their previous values.
    pub fn rotate(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
        user: Option<PortalUser>,
    ) {
        self.access_token = access_token;
        if let Some(refresh) = refresh_token {
            self.refresh_token = Some(refresh);
        }
        if let Some(user) = user {
            self.user = user;
        }
        self.refreshed_at = Utc::now();
    }
}

/// Client-local session storage.
///
/// Reads and writes are non-atomic by design; last writer wins, matching
/// the portal's single-session model.
pub trait SessionStore: Send + Sync {
    /// The current session, if any.
    fn get(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the current session.
    fn set(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the current session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
pub(crate) fn test_user(roles: &[Role]) -> PortalUser {
    PortalUser {
        id: Uuid::new_v4(),
        user_name: "j.dealer".into(),
        roles: roles.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        let user = test_user(&[Role::Dealer, Role::Observer]);
        assert!(user.has_role(Role::Dealer));
        assert!(!user.has_role(Role::Admin));
        assert_eq!(user.primary_role(), Some(Role::Dealer));
    }

    #[test]
    fn test_storage_field_names() {
        let session = Session::new("acc-1".into(), Some("ref-1".into()), test_user(&[Role::Admin]));
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["accessToken"], "acc-1");
        assert_eq!(json["refreshToken"], "ref-1");
        assert_eq!(json["user"]["userName"], "j.dealer");
        assert_eq!(json["user"]["roles"][0], "admin");
    }

    #[test]
    fn test_rotate_keeps_omitted_fields() {
        let user = test_user(&[Role::Customer]);
        let mut session = Session::new("acc-1".into(), Some("ref-1".into()), user.clone());

        session.rotate("acc-2".into(), None, None);

        assert_eq!(session.access_token, "acc-2");
        assert_eq!(session.refresh_token.as_deref(), Some("ref-1"));
        assert_eq!(session.user, user);
    }

    #[test]
    fn test_rotate_replaces_returned_fields() {
        let mut session =
            Session::new("acc-1".into(), Some("ref-1".into()), test_user(&[Role::Customer]));

        let new_user = test_user(&[Role::Customer, Role::Observer]);
        session.rotate("acc-2".into(), Some("ref-2".into()), Some(new_user.clone()));

        assert_eq!(session.refresh_token.as_deref(), Some("ref-2"));
        assert_eq!(session.user, new_user);
    }
}
