//! Timer module
//!
//! The controller that owns the session state and reacts to commands and
//! ticks.

pub mod controller;

pub use controller::TimerController;
