//! Input background tasks forwarding user commands to the main loop

use crossterm::event::{Event, EventStream};
use futures::stream::StreamExt;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info, warn};

use crate::bindings::Command;

/// Read key presses from the terminal
pub async fn key_input_task(tx: mpsc::UnboundedSender<Command>) {
    info!("Starting key input task");

    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) => {
                if let Some(command) = Command::from_key(key) {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read terminal event: {}", e);
                break;
            }
        }
    }
    debug!("Key input task finished");
}

/// Read one command per line from stdin
///
/// The timer keeps running after stdin is closed.
pub async fn line_input_task(tx: mpsc::UnboundedSender<Command>) {
    info!("Starting line input task");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match line.parse::<Command>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => debug!("{}", e),
            },
            Ok(None) => {
                debug!("Stdin closed, no further commands");
                break;
            }
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}
