//! Presentation module
//!
//! Turns the session state into a `View` and hands it to a display surface.

pub mod surface;
pub mod view;

pub use surface::{JsonSurface, Surface, TerminalSurface};
pub use view::{format_time, render, Locale, View};
