//! Background tasks module
//!
//! This module contains the tasks that run alongside the controller loop.

pub mod input;
pub mod ticker;

// Re-export main functions
pub use input::{key_input_task, line_input_task};
pub use ticker::{spawn_ticker, Tick, TickHandle, TickId};
