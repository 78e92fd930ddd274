//! Error types for session-scoped data.
//!
//! [`SessionError::ContextMissing`] is a wiring mistake, not a runtime
//! condition: it means session data was requested before the session
//! provider was initialized. It is always returned to the caller.

use thiserror::Error;

/// Errors raised when reading session-scoped data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session id was requested outside the scope that initializes it.
    #[error("session context missing: the session provider has not been initialized")]
    ContextMissing,
}

/// Convenience type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_missing_display() {
        let err = SessionError::ContextMissing;
        assert!(err.to_string().starts_with("session context missing"));
    }

    #[test]
    fn result_alias() {
        fn missing() -> Result<()> {
            Err(SessionError::ContextMissing)
        }
        assert_eq!(missing(), Err(SessionError::ContextMissing));
    }
}
