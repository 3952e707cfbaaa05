//! End-to-end timer scenarios on a paused tokio clock

use std::{
    io,
    ops::ControlFlow,
    sync::{Arc, Mutex},
    time::Duration,
};

use pomodoro_clock::{
    bindings::{dispatch, Command},
    notifier::{ChimeError, CompletionNotifier, NotificationStatus},
    presentation::{Locale, Surface, View},
    tasks::Tick,
    Session, TimerController,
};
use tokio::sync::mpsc;

#[derive(Clone, Default)]
struct Harness {
    views: Arc<Mutex<Vec<View>>>,
    chimes: Arc<Mutex<Vec<Session>>>,
    notifications: Arc<Mutex<Vec<Session>>>,
    chime_fails: bool,
}

impl Surface for Harness {
    fn present(&mut self, view: &View) -> io::Result<()> {
        self.views.lock().unwrap().push(view.clone());
        Ok(())
    }
}

impl CompletionNotifier for Harness {
    fn play_chime(&mut self, ended: Session) -> Result<(), ChimeError> {
        if self.chime_fails {
            return Err(ChimeError::NoDevice);
        }
        self.chimes.lock().unwrap().push(ended);
        Ok(())
    }

    fn show_notification(&mut self, ended: Session) -> NotificationStatus {
        self.notifications.lock().unwrap().push(ended);
        NotificationStatus::Shown
    }
}

fn setup(harness: &Harness) -> (TimerController, mpsc::UnboundedReceiver<Tick>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let controller = TimerController::new(
        Box::new(harness.clone()),
        Box::new(harness.clone()),
        Locale::En,
        tx,
    );
    (controller, rx)
}

/// Feed every tick the tickers produce within `secs` seconds of clock time
///
/// The deadline sits a quarter second past the last expected tick so the
/// two never race.
async fn run_for(
    controller: &mut TimerController,
    rx: &mut mpsc::UnboundedReceiver<Tick>,
    secs: u64,
) {
    let deadline =
        tokio::time::Instant::now() + Duration::from_secs(secs) + Duration::from_millis(250);
    loop {
        tokio::select! {
            Some(tick) = rx.recv() => controller.on_tick(tick),
            _ = tokio::time::sleep_until(deadline) => break,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn ticker_drives_countdown_once_per_second() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 5).await;

    assert_eq!(controller.state().remaining_seconds(), 1495);
    assert_eq!(controller.view().time, "24:55");
    assert_eq!(controller.view().title, "24:55 · Focus");
}

#[tokio::test(start_paused = true)]
async fn double_start_does_not_double_speed() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    controller.start();
    dispatch(&mut controller, Command::Toggle); // pauses
    dispatch(&mut controller, Command::Toggle); // resumes
    controller.start();

    tokio::time::sleep(Duration::from_millis(5500)).await;
    let mut ticks = Vec::new();
    while let Ok(tick) = rx.try_recv() {
        ticks.push(tick);
    }
    // Only the live ticker's ticks count; the paused one was cancelled
    let live = controller.state().tick_id().unwrap();
    assert_eq!(ticks.iter().filter(|t| t.id == live).count(), 5);
    assert!(ticks.iter().all(|t| t.id == live));

    for tick in ticks {
        controller.on_tick(tick);
    }
    assert_eq!(controller.state().remaining_seconds(), 1495);
}

#[tokio::test(start_paused = true)]
async fn paused_timer_does_not_move() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 3).await;
    controller.stop();
    controller.stop();
    run_for(&mut controller, &mut rx, 10).await;

    assert_eq!(controller.state().remaining_seconds(), 1497);
    assert!(!controller.state().is_running());
    assert_eq!(controller.view().toggle_label, "Start");
}

#[tokio::test(start_paused = true)]
async fn full_cycle_auto_advances_and_keeps_running() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 1500).await;

    assert_eq!(controller.state().session(), Session::Break);
    assert_eq!(controller.state().remaining_seconds(), 300);
    assert!(controller.state().is_running());
    assert!(controller.view().break_mode);
    assert_eq!(*harness.chimes.lock().unwrap(), vec![Session::Focus]);
    assert_eq!(*harness.notifications.lock().unwrap(), vec![Session::Focus]);

    run_for(&mut controller, &mut rx, 300).await;

    assert_eq!(controller.state().session(), Session::Focus);
    assert_eq!(controller.state().remaining_seconds(), 1500);
    assert!(controller.state().is_running());
    assert_eq!(
        *harness.notifications.lock().unwrap(),
        vec![Session::Focus, Session::Break]
    );
}

#[tokio::test(start_paused = true)]
async fn chime_failure_still_advances_and_notifies() {
    let harness = Harness {
        chime_fails: true,
        ..Harness::default()
    };
    let (mut controller, mut rx) = setup(&harness);

    dispatch(&mut controller, Command::Select(Session::Break));
    controller.start();
    run_for(&mut controller, &mut rx, 300).await;

    assert_eq!(controller.state().session(), Session::Focus);
    assert!(controller.state().is_running());
    assert!(harness.chimes.lock().unwrap().is_empty());
    assert_eq!(*harness.notifications.lock().unwrap(), vec![Session::Break]);
}

#[tokio::test(start_paused = true)]
async fn selecting_other_phase_stops_and_resets() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 7).await;
    dispatch(&mut controller, Command::Select(Session::Break));

    assert_eq!(controller.state().session(), Session::Break);
    assert_eq!(controller.state().remaining_seconds(), 300);
    assert!(!controller.state().is_running());

    // Manual switches stay paused
    run_for(&mut controller, &mut rx, 5).await;
    assert_eq!(controller.state().remaining_seconds(), 300);
}

#[tokio::test(start_paused = true)]
async fn selecting_active_phase_is_a_no_op() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 4).await;
    let redraws = harness.views.lock().unwrap().len();

    dispatch(&mut controller, Command::Select(Session::Focus));

    assert!(controller.state().is_running());
    assert_eq!(controller.state().remaining_seconds(), 1496);
    assert_eq!(harness.views.lock().unwrap().len(), redraws);
}

#[tokio::test(start_paused = true)]
async fn reset_command_rewinds_current_phase() {
    let harness = Harness::default();
    let (mut controller, mut rx) = setup(&harness);

    controller.start();
    run_for(&mut controller, &mut rx, 1500 - 842).await;
    assert_eq!(controller.state().remaining_seconds(), 842);

    dispatch(&mut controller, Command::Reset);
    assert_eq!(controller.state().remaining_seconds(), 1500);
    assert!(!controller.state().is_running());
}

#[tokio::test(start_paused = true)]
async fn quit_breaks_the_loop() {
    let harness = Harness::default();
    let (mut controller, _rx) = setup(&harness);

    assert_eq!(dispatch(&mut controller, Command::Quit), ControlFlow::Break(()));
    assert_eq!(dispatch(&mut controller, Command::Toggle), ControlFlow::Continue(()));
}
