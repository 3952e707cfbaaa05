//! Session phases and their fixed durations

use serde::{Deserialize, Serialize};

/// One of the two alternating phases of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    #[default]
    Focus,
    Break,
}

impl Session {
    /// Fixed length of the phase in seconds
    pub fn duration_secs(self) -> u64 {
        match self {
            Session::Focus => 25 * 60,
            Session::Break => 5 * 60,
        }
    }

    /// The phase that follows this one when it completes
    pub fn next(self) -> Self {
        match self {
            Session::Focus => Session::Break,
            Session::Break => Session::Focus,
        }
    }

    /// Pitch of the chime played when this phase ends
    pub fn chime_frequency_hz(self) -> f32 {
        match self {
            Session::Focus => 880.0,
            Session::Break => 660.0,
        }
    }

    pub fn is_break(self) -> bool {
        self == Session::Break
    }
}
