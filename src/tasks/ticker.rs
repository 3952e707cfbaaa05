//! One-second tick background task

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Identifies the ticker a tick came from
pub type TickId = u64;

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

static NEXT_TICK_ID: AtomicU64 = AtomicU64::new(1);

/// A single tick delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub id: TickId,
}

/// Cancellation handle for a running ticker
///
/// Dropping the handle aborts the task as well.
#[derive(Debug)]
pub struct TickHandle {
    id: TickId,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn id(&self) -> TickId {
        self.id
    }

    /// Stop the ticker; no further ticks with this id are sent
    pub fn cancel(self) {
        debug!("Cancelling ticker {}", self.id);
        // abort happens in Drop
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a ticker that sends a `Tick` every second, the first one a full
/// period after spawning
pub fn spawn_ticker(tx: mpsc::UnboundedSender<Tick>) -> TickHandle {
    let id = NEXT_TICK_ID.fetch_add(1, Ordering::Relaxed);
    debug!("Spawning ticker {}", id);

    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        loop {
            interval.tick().await;
            if tx.send(Tick { id }).is_err() {
                debug!("Tick receiver closed, ticker {} exiting", id);
                break;
            }
        }
    });

    TickHandle { id, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_arrives_after_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_ticker(tx);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());

        let tick = rx.recv().await.unwrap();
        assert_eq!(tick.id, handle.id());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_stops_sending() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_ticker(tx);
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        // The task was aborted and its sender dropped
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_unique() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let a = spawn_ticker(tx.clone());
        let b = spawn_ticker(tx);
        assert_ne!(a.id(), b.id());
    }
}
