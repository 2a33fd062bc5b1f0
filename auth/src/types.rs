//! Session types.

use crate::error::AuthError;
use serde::{Deserialize, Serialize};

/// Role of an authenticated identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular visitor: browse and book events.
    User,
    /// Administrator: manage the event catalog.
    Admin,
}

impl Role {
    /// Whether this role grants admin access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The currently authenticated identity.
///
/// Serialized as `{ "email": ..., "role": "user" | "admin" }`, the layout of
/// the persisted `activeUser` record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity as entered at login. Never verified against a directory.
    pub email: String,
    /// Granted role.
    pub role: Role,
}

/// State of the session manager.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    /// The active session, if logged in.
    pub session: Option<Session>,
    /// Last login or storage failure, if any.
    pub last_error: Option<AuthError>,
}

impl AuthState {
    /// Create a new logged-out state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session: None,
            last_error: None,
        }
    }

    /// Whether anyone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the active session holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.role.is_admin())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
    }

    #[test]
    fn session_matches_the_persisted_layout() {
        let session = Session {
            email: "admin@example.com".to_owned(),
            role: Role::Admin,
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "email": "admin@example.com", "role": "admin" })
        );
    }

    #[test]
    fn admin_check_follows_the_session_role() {
        let mut state = AuthState::new();
        assert!(!state.is_authenticated());
        assert!(!state.is_admin());

        state.session = Some(Session {
            email: "user@example.com".to_owned(),
            role: Role::User,
        });
        assert!(state.is_authenticated());
        assert!(!state.is_admin());

        state.session = Some(Session {
            email: "admin@example.com".to_owned(),
            role: Role::Admin,
        });
        assert!(state.is_admin());
    }
}
