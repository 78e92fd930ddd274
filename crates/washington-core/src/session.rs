//! Session identity provider.
//!
//! [`SessionProvider`] holds at most one [`Session`]. The first call to
//! [`SessionProvider::init`] computes the id; every later call returns the
//! same session, so re-entering the owning scope never regenerates it.
//! Reading before initialization yields [`SessionError::ContextMissing`].
//!
//! The process-wide provider behind [`init_session`] / [`current_session`]
//! gives one session per process. Components that build events take the id
//! explicitly rather than reading the global themselves.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::constants::DEFAULT_SESSION_PREFIX;
use crate::errors::{Result, SessionError};
use crate::ids::SessionId;

/// One load of the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session with a freshly generated id.
    #[must_use]
    pub fn start(prefix: &str) -> Self {
        Self::with_id(SessionId::generate(prefix))
    }

    /// Wrap an existing id (e.g. one handed in by a host shell).
    #[must_use]
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            started_at: Utc::now(),
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// When the session was created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Initialize-once holder for a [`Session`].
#[derive(Debug, Default)]
pub struct SessionProvider {
    cell: OnceLock<Session>,
}

impl SessionProvider {
    /// Create an uninitialized provider.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Initialize with the default prefix, or return the existing session.
    pub fn init(&self) -> &Session {
        self.init_with_prefix(DEFAULT_SESSION_PREFIX)
    }

    /// Initialize with a custom prefix, or return the existing session.
    ///
    /// The prefix only matters for the first call.
    pub fn init_with_prefix(&self, prefix: &str) -> &Session {
        self.cell.get_or_init(|| {
            let session = Session::start(prefix);
            tracing::debug!(session_id = %session.id(), "session initialized");
            session
        })
    }

    /// Initialize with a caller-supplied session.
    ///
    /// Returns the stored session; if one already existed, `session` is dropped.
    pub fn init_with(&self, session: Session) -> &Session {
        self.cell.get_or_init(|| session)
    }

    /// The initialized session.
    pub fn get(&self) -> Result<&Session> {
        self.cell.get().ok_or(SessionError::ContextMissing)
    }

    /// The initialized session id.
    pub fn session_id(&self) -> Result<&SessionId> {
        self.get().map(Session::id)
    }

    /// Whether [`init`](Self::init) has run.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

static SESSION: SessionProvider = SessionProvider::new();

/// Initialize the process-wide session (default prefix). Idempotent.
pub fn init_session() -> &'static Session {
    SESSION.init()
}

/// Initialize the process-wide session with a prefix. Idempotent.
pub fn init_session_with_prefix(prefix: &str) -> &'static Session {
    SESSION.init_with_prefix(prefix)
}

/// The process-wide session, or `ContextMissing` before [`init_session`].
pub fn current_session() -> Result<&'static Session> {
    SESSION.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn get_before_init_is_context_missing() {
        let provider = SessionProvider::new();
        assert!(!provider.is_initialized());
        assert_matches!(provider.get(), Err(SessionError::ContextMissing));
        assert_matches!(provider.session_id(), Err(SessionError::ContextMissing));
    }

    #[test]
    fn init_is_idempotent() {
        let provider = SessionProvider::new();
        let first = provider.init().id().clone();
        let second = provider.init().id().clone();
        let third = provider.init_with_prefix("other").id().clone();
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn reads_after_init_are_stable() {
        let provider = SessionProvider::new();
        let created = provider.init().id().clone();
        for _ in 0..50 {
            assert_eq!(provider.session_id().unwrap(), &created);
        }
    }

    #[test]
    fn init_with_keeps_first_session() {
        let provider = SessionProvider::new();
        let stored = provider.init_with(Session::with_id("sess-a".into()));
        assert_eq!(stored.id().as_str(), "sess-a");
        let again = provider.init_with(Session::with_id("sess-b".into()));
        assert_eq!(again.id().as_str(), "sess-a");
    }

    #[test]
    fn custom_prefix_applies_on_first_init() {
        let provider = SessionProvider::new();
        let session = provider.init_with_prefix("guest");
        assert!(session.id().starts_with("guest-"));
    }

    #[test]
    fn global_session_is_shared() {
        let a = init_session().id().clone();
        let b = current_session().unwrap().id().clone();
        assert_eq!(a, b);
        assert_eq!(init_session_with_prefix("ignored").id(), &a);
    }

    #[test]
    fn started_at_is_set() {
        let before = Utc::now();
        let session = Session::start("sess");
        assert!(session.started_at() >= before);
    }
}
