//! Session Manager.
//!
//! Owns the current authenticated identity (email and role) and mirrors it
//! to the durable store under the `activeUser` key. Authentication is a
//! placeholder: any non-empty email and password combination succeeds, and
//! the role is decided by which login command was sent, not by a credential
//! store. Do not assume real verification semantics.

pub mod actions;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod types;

pub use actions::AuthAction;
pub use environment::{AuthEnvironment, ACTIVE_USER_KEY};
pub use error::AuthError;
pub use reducer::AuthReducer;
pub use types::{AuthState, Role, Session};
