//! Session state record owned by the timer controller

use crate::tasks::ticker::{TickHandle, TickId};

use super::Session;

/// The single mutable record behind the timer
///
/// Running-ness is derived from the presence of a tick handle, so the
/// timer can never be marked running without an active ticker.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) session: Session,
    pub(crate) remaining_seconds: u64,
    pub(crate) tick: Option<TickHandle>,
}

impl SessionState {
    /// Create the initial state: a fresh, paused focus phase
    pub fn new() -> Self {
        Self::fresh(Session::Focus)
    }

    /// Create a paused state at the start of the given phase
    pub fn fresh(session: Session) -> Self {
        Self {
            session,
            remaining_seconds: session.duration_secs(),
            tick: None,
        }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Check if the tick loop is active
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Id of the active ticker, if running
    pub fn tick_id(&self) -> Option<TickId> {
        self.tick.as_ref().map(TickHandle::id)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
