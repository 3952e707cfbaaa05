//! Timer controller: the only code that mutates the session state

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    notifier::{notify_completion, CompletionNotifier},
    presentation::{render, Locale, Surface, View},
    state::{Session, SessionState},
    tasks::ticker::{spawn_ticker, Tick},
};

/// Owns the session state and drives it from commands and ticks
pub struct TimerController {
    state: SessionState,
    surface: Box<dyn Surface>,
    notifier: Box<dyn CompletionNotifier>,
    locale: Locale,
    tick_tx: mpsc::UnboundedSender<Tick>,
}

impl TimerController {
    /// Create a controller with a fresh, paused focus phase
    ///
    /// Ticks from started timers are sent to `tick_tx`; the owner feeds them
    /// back through [`TimerController::on_tick`].
    pub fn new(
        surface: Box<dyn Surface>,
        notifier: Box<dyn CompletionNotifier>,
        locale: Locale,
        tick_tx: mpsc::UnboundedSender<Tick>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            surface,
            notifier,
            locale,
            tick_tx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state, self.locale)
    }

    /// Start counting down. No-op if already running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            debug!("Start requested while running, ignoring");
            return;
        }

        let handle = spawn_ticker(self.tick_tx.clone());
        info!(
            "Timer started: {:?} with {}s remaining",
            self.state.session, self.state.remaining_seconds
        );
        self.state.tick = Some(handle);
        self.refresh();
    }

    /// Pause the countdown. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.state.tick.take() {
            info!(
                "Timer stopped: {:?} with {}s remaining",
                self.state.session, self.state.remaining_seconds
            );
            handle.cancel();
        }
        self.refresh();
    }

    pub fn toggle(&mut self) {
        if self.state.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Stop and switch to `target`, optionally restarting its countdown
    ///
    /// Does not guard against `target` already being active; callers that
    /// want selection of the active phase to be a no-op must check first.
    pub fn set_session(&mut self, target: Session, reset_time: bool) {
        self.stop();
        info!("Switching session from {:?} to {:?}", self.state.session, target);
        self.state.session = target;
        if reset_time {
            self.state.remaining_seconds = target.duration_secs();
        }
        self.refresh();
    }

    /// Stop and rewind the current phase to its full duration
    pub fn reset(&mut self) {
        self.stop();
        self.state.remaining_seconds = self.state.session.duration_secs();
        info!("Session reset: {:?}", self.state.session);
        self.refresh();
    }

    /// Handle one tick from the ticker
    ///
    /// Ticks from a ticker that is no longer active are dropped.
    pub fn on_tick(&mut self, tick: Tick) {
        if self.state.tick_id() != Some(tick.id) {
            debug!("Ignoring stale tick from ticker {}", tick.id);
            return;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds == 0 {
            self.complete_session();
            return;
        }
        self.refresh();
    }

    fn complete_session(&mut self) {
        let ended = self.state.session;
        notify_completion(self.notifier.as_mut(), ended);
        self.set_session(ended.next(), true);
        self.start();
    }

    /// Redraw the surface from the current state
    pub fn refresh(&mut self) {
        let view = render(&self.state, self.locale);
        if let Err(e) = self.surface.present(&view) {
            warn!("Failed to update display: {}", e);
        }
    }
}
