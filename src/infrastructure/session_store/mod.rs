//! Session store - the single source of truth for the current session
//!
//! Exactly one session record exists at a time. `set` replaces the previous
//! record whole, never merges, so a stale tier can never leak across logins.
//! Producers never write here directly; only the access manager does.

mod file;
mod in_memory;

pub use file::FileSessionStore;
pub use in_memory::InMemorySessionStore;

use crate::domain::{AccessError, Session};

/// Persisted record of the current session
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// The current session, if any.
    fn get(&self) -> Result<Option<Session>, AccessError>;

    /// Replace the current session unconditionally.
    fn set(&self, session: Session) -> Result<(), AccessError>;

    /// Remove the current session. Idempotent.
    fn clear(&self) -> Result<(), AccessError>;
}
