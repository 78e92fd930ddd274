//! # washington-core
//!
//! Foundation types shared by every Washington crate:
//!
//! - **Session identity**: [`SessionId`] and the initialize-once [`SessionProvider`]
//! - **Errors**: [`SessionError`] via `thiserror`
//! - **Constants**: the event stream channel name and session id prefix
//! - **Logging**: `tracing` subscriber setup and in-memory log capture for tests

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod ids;
pub mod logging;
pub mod session;

pub use errors::{Result, SessionError};
pub use ids::{SessionId, create_session_id};
pub use session::{Session, SessionProvider, current_session, init_session, init_session_with_prefix};
