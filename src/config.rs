//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::presentation::Locale;

/// Where the timer is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Output {
    /// Interactive single-line terminal display driven by key presses
    #[default]
    Terminal,
    /// One JSON object per update on stdout, commands read from stdin lines
    Json,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-clock")]
#[command(about = "A focus/break countdown timer with chimes and desktop notifications")]
#[command(version)]
pub struct Config {
    /// Language for labels and notifications
    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub lang: Locale,

    /// Display mode
    #[arg(long, value_enum, default_value_t = Output::Terminal)]
    pub output: Output,

    /// Start the focus countdown immediately
    #[arg(long)]
    pub autostart: bool,

    /// Do not play a chime when a session ends
    #[arg(long)]
    pub mute: bool,

    /// Do not show desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    ///
    /// The terminal display shares the tty with stderr, so only warnings
    /// are logged there unless asked otherwise.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.output == Output::Terminal && self.log_file.is_none() {
            "warn"
        } else {
            "info"
        }
    }

    /// Tracing filter directive for this crate
    pub fn log_filter(&self) -> String {
        format!("pomodoro_clock={}", self.log_level())
    }
}
