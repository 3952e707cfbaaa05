//! Rendering of the session state into displayable text

use clap::ValueEnum;
use serde::Serialize;

use crate::state::{Session, SessionState};

/// Language used for labels and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Localized name of a phase
    pub fn session_name(self, session: Session) -> &'static str {
        match (self, session) {
            (Locale::En, Session::Focus) => "Focus",
            (Locale::En, Session::Break) => "Break",
            (Locale::Zh, Session::Focus) => "专注",
            (Locale::Zh, Session::Break) => "休息",
        }
    }

    pub fn phase_label(self, session: Session) -> String {
        match self {
            Locale::En => format!("Current: {}", self.session_name(session)),
            Locale::Zh => format!("当前：{}", self.session_name(session)),
        }
    }

    pub fn toggle_label(self, running: bool) -> &'static str {
        match (self, running) {
            (Locale::En, true) => "Pause",
            (Locale::En, false) => "Start",
            (Locale::Zh, true) => "暂停",
            (Locale::Zh, false) => "开始",
        }
    }

    pub fn reset_label(self) -> &'static str {
        match self {
            Locale::En => "Reset",
            Locale::Zh => "重置",
        }
    }

    /// Title of the desktop notification shown when `ended` completes
    pub fn completion_title(self, ended: Session) -> String {
        match self {
            Locale::En => format!("{} finished", self.session_name(ended)),
            Locale::Zh => format!("{}结束", self.session_name(ended)),
        }
    }

    pub fn completion_body(self) -> &'static str {
        match self {
            Locale::En => "Switching to the next phase automatically",
            Locale::Zh => "自动切换到下一阶段",
        }
    }
}

/// Everything a surface needs to draw the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub time: String,
    pub phase_label: String,
    pub toggle_label: String,
    pub running: bool,
    /// Set while a break is active
    pub break_mode: bool,
    pub active_selector: Session,
    pub title: String,
}

/// Format seconds as `MM:SS`, both parts zero-padded to two digits
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Build the view for the current state
pub fn render(state: &SessionState, locale: Locale) -> View {
    let session = state.session();
    let time = format_time(state.remaining_seconds());
    let title = format!("{} · {}", time, locale.session_name(session));

    View {
        phase_label: locale.phase_label(session),
        toggle_label: locale.toggle_label(state.is_running()).to_string(),
        running: state.is_running(),
        break_mode: session.is_break(),
        active_selector: session,
        title,
        time,
    }
}
