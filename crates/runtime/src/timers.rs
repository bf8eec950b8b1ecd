//! Wall-clock interval timers backed by tokio.
//!
//! Every running timer is a task ticking a `tokio::time::interval` and sending
//! the object id to the simulation worker. Cancelling aborts the task; a
//! firing already queued before the abort reaches the worker as a stale id and
//! is dropped there.

use std::collections::HashMap;
use std::time::Duration;

use maze_core::{IntervalTimers, ObjectId, TimerHandle};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shortest period a timer may run at; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct TokioTimers {
    runtime: Handle,
    firings: mpsc::UnboundedSender<ObjectId>,
    next_handle: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioTimers {
    pub fn new(runtime: Handle, firings: mpsc::UnboundedSender<ObjectId>) -> Self {
        Self {
            runtime,
            firings,
            next_handle: 0,
            tasks: HashMap::new(),
        }
    }

    /// Creates timers on the current tokio runtime along with the receiving
    /// end of their firings.
    pub fn on_current_runtime()
    -> Result<(Self, mpsc::UnboundedReceiver<ObjectId>), tokio::runtime::TryCurrentError> {
        let runtime = Handle::try_current()?;
        let (firings, firing_rx) = mpsc::unbounded_channel();
        Ok((Self::new(runtime, firings), firing_rx))
    }
}

impl IntervalTimers for TokioTimers {
    fn start(&mut self, object: ObjectId, every: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let period = every.max(MIN_PERIOD);
        let firings = self.firings.clone();
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                if firings.send(object).is_err() {
                    break;
                }
            }
        });

        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }

    fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
