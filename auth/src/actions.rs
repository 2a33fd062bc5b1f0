//! Session actions.
//!
//! Commands mutate the session synchronously; feedback events report the
//! persistence outcome and are what observers see broadcast.

use crate::error::AuthError;
use crate::types::Session;
use serde::{Deserialize, Serialize};

/// All inputs to the session reducer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AuthAction {
    // ========== Commands ==========
    /// Command: log in as a regular user.
    ///
    /// No credential store is consulted; any non-empty email and password
    /// combination succeeds and is granted the `user` role.
    LoginUser {
        /// Identity to record on the session.
        email: String,
        /// Accepted unverified; only checked for non-emptiness.
        password: String,
    },

    /// Command: log in as an administrator.
    ///
    /// Same placeholder semantics as [`AuthAction::LoginUser`], granting
    /// the `admin` role instead.
    LoginAdmin {
        /// Identity to record on the session.
        email: String,
        /// Accepted unverified; only checked for non-emptiness.
        password: String,
    },

    /// Command: end the active session and clear the persisted record.
    ///
    /// Logging out while logged out is a no-op that still clears storage.
    Logout,

    /// Command: hydrate the session from the durable store.
    ///
    /// Dispatched once at process start.
    LoadSession,

    // ========== Feedback events ==========
    /// Event: login persisted.
    LoggedIn {
        /// The session as recorded.
        session: Session,
    },

    /// Event: logout persisted.
    LoggedOut,

    /// Event: hydration finished.
    SessionLoaded {
        /// The persisted session, or `None` when no record existed.
        session: Option<Session>,
    },

    /// Event: a session operation failed (validation or storage).
    AuthFailed {
        /// What went wrong.
        error: AuthError,
    },
}

impl AuthAction {
    /// Whether this action is a command.
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::LoginUser { .. } | Self::LoginAdmin { .. } | Self::Logout | Self::LoadSession
        )
    }

    /// Whether this action is a feedback event.
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_and_events_partition_the_enum() {
        let command = AuthAction::Logout;
        assert!(command.is_command());
        assert!(!command.is_event());

        let event = AuthAction::LoggedOut;
        assert!(event.is_event());
        assert!(!event.is_command());
    }
}
