//! Reducer logic for the session manager.
//!
//! Logins set the session in place and write it through to the durable
//! store; logout clears both. The store is read once, at startup, via
//! [`AuthAction::LoadSession`]. Feedback events are idempotent.

use crate::actions::AuthAction;
use crate::environment::{AuthEnvironment, ACTIVE_USER_KEY};
use crate::error::AuthError;
use crate::types::{AuthState, Role, Session};
use slotbook_core::{effect::Effect, reducer::Reducer, SmallVec};
use slotbook_storage::DurableStore;
use std::sync::Arc;

/// Reducer for the session manager.
#[derive(Clone, Debug, Default)]
pub struct AuthReducer;

impl AuthReducer {
    /// Creates a new `AuthReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rejects blank login input. Nothing else is checked.
    fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation {
                reason: "email is required".to_owned(),
            });
        }
        if password.trim().is_empty() {
            return Err(AuthError::Validation {
                reason: "password is required".to_owned(),
            });
        }
        Ok(())
    }

    /// Effect that writes the session through, then feeds back `LoggedIn`.
    fn persist_session(
        store: &Arc<dyn DurableStore>,
        session: Session,
    ) -> Effect<AuthAction> {
        let store = Arc::clone(store);

        Effect::future(async move {
            let value = match serde_json::to_value(&session) {
                Ok(value) => value,
                Err(err) => {
                    tracing::error!(error = %err, "session failed to encode");
                    return Some(AuthAction::AuthFailed {
                        error: AuthError::Storage {
                            reason: err.to_string(),
                        },
                    });
                },
            };

            match store.write_record(ACTIVE_USER_KEY, value).await {
                Ok(()) => Some(AuthAction::LoggedIn { session }),
                Err(err) => {
                    tracing::error!(error = %err, "session write-through failed");
                    Some(AuthAction::AuthFailed {
                        error: AuthError::Storage {
                            reason: err.to_string(),
                        },
                    })
                },
            }
        })
    }

    /// Applies a login command: validate, set the session, persist.
    fn login(
        state: &mut AuthState,
        email: String,
        password: &str,
        role: Role,
        env: &AuthEnvironment,
    ) -> SmallVec<[Effect<AuthAction>; 4]> {
        let mut effects = SmallVec::new();

        if let Err(error) = Self::validate_login(&email, password) {
            state.last_error = Some(error.clone());
            effects.push(Effect::future(async move {
                Some(AuthAction::AuthFailed { error })
            }));
            return effects;
        }

        let session = Session { email, role };
        state.session = Some(session.clone());
        state.last_error = None;

        effects.push(Self::persist_session(&env.store, session));
        effects
    }

    /// Applies a feedback event to state. Idempotent.
    fn apply_event(state: &mut AuthState, action: &AuthAction) {
        match action {
            AuthAction::LoggedIn { session } => {
                state.session = Some(session.clone());
                state.last_error = None;
            },
            AuthAction::LoggedOut => {
                state.session = None;
                state.last_error = None;
            },
            AuthAction::SessionLoaded { session } => {
                state.session.clone_from(session);
                state.last_error = None;
            },
            AuthAction::AuthFailed { error } => {
                state.last_error = Some(error.clone());
            },
            // Commands are not applied here
            AuthAction::LoginUser { .. }
            | AuthAction::LoginAdmin { .. }
            | AuthAction::Logout
            | AuthAction::LoadSession => {},
        }
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();

        match action {
            // ========== Commands ==========
            AuthAction::LoginUser { email, password } => {
                return Self::login(state, email, &password, Role::User, env);
            },

            AuthAction::LoginAdmin { email, password } => {
                return Self::login(state, email, &password, Role::Admin, env);
            },

            AuthAction::Logout => {
                state.session = None;
                state.last_error = None;

                let store = Arc::clone(&env.store);
                effects.push(Effect::future(async move {
                    match store.remove_record(ACTIVE_USER_KEY).await {
                        Ok(()) => Some(AuthAction::LoggedOut),
                        Err(err) => {
                            tracing::error!(error = %err, "session removal failed");
                            Some(AuthAction::AuthFailed {
                                error: AuthError::Storage {
                                    reason: err.to_string(),
                                },
                            })
                        },
                    }
                }));
            },

            AuthAction::LoadSession => {
                let store = Arc::clone(&env.store);

                effects.push(Effect::future(async move {
                    match store.read_record(ACTIVE_USER_KEY).await {
                        Ok(Some(value)) => match serde_json::from_value(value) {
                            Ok(session) => Some(AuthAction::SessionLoaded {
                                session: Some(session),
                            }),
                            Err(err) => {
                                // Corrupt record: start logged out
                                tracing::warn!(error = %err, "persisted session unreadable, starting logged out");
                                Some(AuthAction::SessionLoaded { session: None })
                            },
                        },
                        Ok(None) => Some(AuthAction::SessionLoaded { session: None }),
                        Err(err) => {
                            tracing::error!(error = %err, "session hydration failed");
                            Some(AuthAction::AuthFailed {
                                error: AuthError::Storage {
                                    reason: err.to_string(),
                                },
                            })
                        },
                    }
                }));
            },

            // ========== Feedback events ==========
            event => Self::apply_event(state, &event),
        }

        effects
    }
}
