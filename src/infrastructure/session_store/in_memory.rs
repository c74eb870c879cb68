use std::sync::RwLock;

use super::SessionStore;
use crate::domain::{AccessError, Session};

/// In-memory session store
///
/// Holds the record for the lifetime of the process; used by tests and by
/// callers that do not want persistence.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    current: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Result<Option<Session>, AccessError> {
        Ok(self.current.read().unwrap().clone())
    }

    fn set(&self, session: Session) -> Result<(), AccessError> {
        *self.current.write().unwrap() = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), AccessError> {
        *self.current.write().unwrap() = None;
        Ok(())
    }
}
