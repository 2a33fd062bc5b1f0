//! Session manager errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of session operations.
///
/// Login never fails on credentials (none are verified); the only failure
/// modes are blank input and storage trouble.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// Login input was rejected.
    #[error("{reason}")]
    Validation {
        /// Human-readable reason.
        reason: String,
    },

    /// The durable store failed.
    #[error("storage failure: {reason}")]
    Storage {
        /// Underlying failure, stringified for a serializable error.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_the_reason_verbatim() {
        let error = AuthError::Validation {
            reason: "email is required".to_owned(),
        };
        assert_eq!(error.to_string(), "email is required");
    }
}
