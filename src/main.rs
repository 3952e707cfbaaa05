//! Pomodoro Clock - a focus/break countdown timer
//!
//! This is the main entry point for the pomodoro-clock application.

use std::{fs::OpenOptions, ops::ControlFlow};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;

use pomodoro_clock::{
    bindings::dispatch,
    config::{Config, Output},
    notifier::SystemNotifier,
    presentation::{JsonSurface, Surface, TerminalSurface},
    tasks::{key_input_task, line_input_task},
    timer::TimerController,
    utils::{shutdown_signal, shutdown_signals},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing; the guard flushes buffered log lines on exit
    let (writer, _log_guard) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .init();

    info!("Starting pomodoro-clock v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: lang={:?}, output={:?}, autostart={}, mute={}, notify={}",
        config.lang, config.output, config.autostart, config.mute, !config.no_notify
    );

    let signals = shutdown_signals().context("Failed to register signal handlers")?;

    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    let surface: Box<dyn Surface> = match config.output {
        Output::Terminal => {
            let surface = TerminalSurface::stdout(config.lang)
                .context("Failed to initialize terminal")?;
            tokio::spawn(key_input_task(command_tx));
            Box::new(surface)
        }
        Output::Json => {
            tokio::spawn(line_input_task(command_tx));
            Box::new(JsonSurface::stdout())
        }
    };
    let notifier = Box::new(SystemNotifier::new(
        config.lang,
        config.mute,
        !config.no_notify,
    ));

    let mut controller = TimerController::new(surface, notifier, config.lang, tick_tx);
    controller.refresh();
    if config.autostart {
        controller.start();
    }

    let shutdown = shutdown_signal(signals);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => controller.on_tick(tick),
            Some(command) = command_rx.recv() => {
                if let ControlFlow::Break(()) = dispatch(&mut controller, command) {
                    info!("Quit requested");
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    controller.stop();
    // Dropping the controller restores the terminal
    drop(controller);

    info!("Shutdown complete");
    Ok(())
}
