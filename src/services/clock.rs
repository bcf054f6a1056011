//! Fixed-rate simulation clock.
//!
//! The clock owns the tick cadence, nothing else: it advances the shared
//! board `tick_hz` times per second and publishes each tick's placements
//! through a watch channel. Consumers read the latest snapshot whenever
//! they render, so a slow renderer never stalls the simulation and a
//! fast one simply sees some snapshots twice.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::canvas::{Board, Placement};
use crate::models::LayerId;

/// Placements published after one tick, in z-order.
pub type FrameSnapshot = Vec<(LayerId, Placement)>;

#[derive(Debug)]
pub struct Clock {
    board: Arc<Mutex<Board>>,
    tick_hz: u32,
    publisher: watch::Sender<FrameSnapshot>,
}

/// Handle to a running clock task.
#[derive(Debug)]
pub struct ClockHandle {
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<u64>,
}

impl Clock {
    pub fn new(board: Arc<Mutex<Board>>, tick_hz: u32) -> Self {
        let (publisher, _) = watch::channel(FrameSnapshot::new());
        Self {
            board,
            tick_hz: tick_hz.max(1),
            publisher,
        }
    }

    /// Subscribe to per-tick placement snapshots.
    pub fn subscribe(&self) -> watch::Receiver<FrameSnapshot> {
        self.publisher.subscribe()
    }

    /// Starts the tick loop. The returned handle stops it.
    pub fn spawn(self) -> ClockHandle {
        let (shutdown, mut stop) = watch::channel(false);
        let period = Duration::from_secs_f64(1.0 / f64::from(self.tick_hz));
        debug!(tick_hz = self.tick_hz, "simulation clock started");

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A stalled host should drop ticks, not replay them in a burst.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let placements = self.board.lock().await.tick();
                        ticks += 1;
                        trace!(ticks, published = placements.len(), "tick");
                        let _ = self.publisher.send(placements);
                    }
                    changed = stop.changed() => {
                        if changed.is_err() || *stop.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!(ticks, "simulation clock stopped");
            ticks
        });

        ClockHandle { shutdown, task }
    }
}

impl ClockHandle {
    /// Stops the tick loop and returns how many ticks ran.
    pub async fn stop(self) -> u64 {
        let _ = self.shutdown.send(true);
        self.task.await.unwrap_or(0)
    }
}
