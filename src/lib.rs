//! Pomodoro Clock - a focus/break countdown timer
//!
//! This library provides the session state, the controller that drives it
//! from user commands and one-second ticks, the presentation layer, and the
//! completion chime and desktop notification.

pub mod bindings;
pub mod config;
pub mod notifier;
pub mod presentation;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use bindings::{dispatch, Command};
pub use config::Config;
pub use state::{Session, SessionState};
pub use timer::TimerController;
pub use utils::signals::shutdown_signal;
