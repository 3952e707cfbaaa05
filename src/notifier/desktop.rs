//! Desktop notifications through notify-rust, gated by a permission state

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{presentation::Locale, state::Session};

const APP_NAME: &str = "Pomodoro Clock";

/// Whether desktop notifications may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Undetermined,
}

/// What happened when a completion notification was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    Shown,
    PermissionRequested,
    Suppressed,
}

/// Platform side of desktop notifications
///
/// Both calls may block; they are always run on tokio's blocking pool.
pub trait NotificationBackend: Send + Sync {
    fn show(&self, title: &str, body: &str) -> Result<(), String>;
    fn probe(&self) -> Permission;
}

/// Default backend (notify-rust)
#[derive(Debug, Default)]
pub struct NotifyRustBackend;

impl NotificationBackend for NotifyRustBackend {
    fn show(&self, title: &str, body: &str) -> Result<(), String> {
        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn probe(&self) -> Permission {
        probe_notification_server()
    }
}

pub struct DesktopNotifier {
    locale: Locale,
    permission: Arc<Mutex<Permission>>,
    backend: Arc<dyn NotificationBackend>,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for DesktopNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopNotifier")
            .field("locale", &self.locale)
            .field("permission", &self.permission())
            .finish()
    }
}

impl DesktopNotifier {
    pub fn new(locale: Locale, enabled: bool) -> Self {
        Self::with_backend(locale, enabled, Arc::new(NotifyRustBackend))
    }

    pub fn with_backend(
        locale: Locale,
        enabled: bool,
        backend: Arc<dyn NotificationBackend>,
    ) -> Self {
        let initial = if enabled {
            Permission::Undetermined
        } else {
            Permission::Denied
        };
        Self {
            locale,
            permission: Arc::new(Mutex::new(initial)),
            backend,
            in_flight: None,
        }
    }

    pub fn permission(&self) -> Permission {
        // A poisoned lock only means a permission check panicked; treat it as denied
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Denied)
    }

    /// Announce the end of `ended`
    ///
    /// Never blocks the caller: showing and permission probing both happen
    /// on tokio's blocking pool.
    pub fn notify(&mut self, ended: Session) -> NotificationStatus {
        match self.permission() {
            Permission::Granted => {
                let title = self.locale.completion_title(ended);
                let body = self.locale.completion_body();
                let backend = Arc::clone(&self.backend);
                self.in_flight = Some(tokio::task::spawn_blocking(move || {
                    match backend.show(&title, body) {
                        Ok(()) => debug!("Desktop notification shown: {}", title),
                        Err(e) => warn!("Failed to show desktop notification: {}", e),
                    }
                }));
                NotificationStatus::Shown
            }
            Permission::Undetermined => {
                self.request_permission();
                NotificationStatus::PermissionRequested
            }
            Permission::Denied => NotificationStatus::Suppressed,
        }
    }

    /// Fire-and-forget permission check; the outcome applies to later
    /// completions
    fn request_permission(&mut self) {
        let permission = Arc::clone(&self.permission);
        let backend = Arc::clone(&self.backend);
        self.in_flight = Some(tokio::task::spawn_blocking(move || {
            let outcome = backend.probe();
            info!("Desktop notification permission resolved: {:?}", outcome);
            if let Ok(mut p) = permission.lock() {
                *p = outcome;
            }
        }));
    }

    /// Wait for the last show or permission check to finish
    pub async fn settle(&mut self) {
        if let Some(task) = self.in_flight.take() {
            if let Err(e) = task.await {
                warn!("Notification worker failed: {}", e);
            }
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn probe_notification_server() -> Permission {
    match notify_rust::get_server_information() {
        Ok(info) => {
            debug!("Found notification server: {}", info.name);
            Permission::Granted
        }
        Err(e) => {
            debug!("No notification server available: {}", e);
            Permission::Denied
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn probe_notification_server() -> Permission {
    Permission::Granted
}
