//! Completion notifier module
//!
//! Announces the end of a phase with a chime and a desktop notification.
//! Both effects are best-effort and independent of each other.

pub mod chime;
pub mod desktop;

use tracing::{debug, info, warn};

use crate::{presentation::Locale, state::Session};

pub use chime::{AudioOpener, Chime, ChimeError};
pub use desktop::{
    DesktopNotifier, NotificationBackend, NotificationStatus, NotifyRustBackend, Permission,
};

/// Effects fired when a phase runs out
pub trait CompletionNotifier: Send {
    fn play_chime(&mut self, ended: Session) -> Result<(), ChimeError>;
    fn show_notification(&mut self, ended: Session) -> NotificationStatus;
}

/// Fire both completion effects, logging and discarding failures
pub fn notify_completion(notifier: &mut dyn CompletionNotifier, ended: Session) {
    info!("Session complete: {:?}", ended);

    if let Err(e) = notifier.play_chime(ended) {
        warn!("Unable to play notification sound: {}", e);
    }

    let status = notifier.show_notification(ended);
    debug!("Completion notification handled: {:?}", status);
}

/// Chime plus desktop notification
#[derive(Debug)]
pub struct SystemNotifier {
    chime: Chime,
    desktop: DesktopNotifier,
}

impl SystemNotifier {
    pub fn new(locale: Locale, mute: bool, notifications: bool) -> Self {
        Self {
            chime: Chime::new(mute),
            desktop: DesktopNotifier::new(locale, notifications),
        }
    }
}

impl CompletionNotifier for SystemNotifier {
    fn play_chime(&mut self, ended: Session) -> Result<(), ChimeError> {
        self.chime.play(ended.chime_frequency_hz())
    }

    fn show_notification(&mut self, ended: Session) -> NotificationStatus {
        self.desktop.notify(ended)
    }
}
