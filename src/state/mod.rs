//! State management module
//!
//! This module contains the session phases and the state record the timer
//! controller owns.

pub mod session;
pub mod session_state;

// Re-export main types
pub use session::Session;
pub use session_state::SessionState;
