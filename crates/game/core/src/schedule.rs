//! Interval timers for autonomously acting objects.
//!
//! The world does not know how time passes. It asks an [`IntervalTimers`]
//! driver to start one recurring timer per interval-driven object and to
//! cancel it when the object is destroyed. Firings come back to the world as
//! calls to [`World::fire_interval`](crate::engine::World::fire_interval).
//!
//! [`ManualTimers`] is a deterministic virtual clock: nothing fires until the
//! driver calls [`World::advance_time`](crate::engine::World::advance_time).
//! The runtime crate provides a tokio-backed driver for wall-clock time.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::state::ObjectId;

/// Opaque handle to a running timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(pub u64);

/// Scheduler abstraction for recurring object turns.
pub trait IntervalTimers: Send {
    /// Starts a timer firing for `object` every `every`.
    fn start(&mut self, object: ObjectId, every: Duration) -> TimerHandle;

    /// Stops a timer. Must take effect before returning; unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Advances virtual time and returns the firings that became due, in order.
    ///
    /// Wall-clock drivers deliver firings on their own and return nothing.
    fn advance(&mut self, _elapsed: Duration) -> Vec<ObjectId> {
        Vec::new()
    }

    /// Number of timers currently running.
    fn active(&self) -> usize;
}

#[derive(Clone, Debug)]
struct ManualTimer {
    object: ObjectId,
    every: Duration,
    next_due: Duration,
}

/// Deterministic virtual-time driver.
#[derive(Clone, Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, ManualTimer>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }
}

impl IntervalTimers for ManualTimers {
    fn start(&mut self, object: ObjectId, every: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            ManualTimer {
                object,
                every,
                next_due: self.now + every,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<ObjectId> {
        self.now += elapsed;

        let mut due = Vec::new();
        for (handle, timer) in self.timers.iter_mut() {
            if timer.every.is_zero() {
                continue;
            }
            while timer.next_due <= self.now {
                due.push((timer.next_due, *handle, timer.object));
                timer.next_due += timer.every;
            }
        }

        due.sort();
        due.into_iter().map(|(_, _, object)| object).collect()
    }

    fn active(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut timers = ManualTimers::new();
        timers.start(ObjectId(1), Duration::from_millis(100));

        assert!(timers.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(timers.advance(Duration::from_millis(1)), vec![ObjectId(1)]);
        assert_eq!(
            timers.advance(Duration::from_millis(250)),
            vec![ObjectId(1), ObjectId(1)]
        );
        assert_eq!(timers.now(), Duration::from_millis(350));
    }

    #[test]
    fn firings_are_ordered_by_due_time() {
        let mut timers = ManualTimers::new();
        timers.start(ObjectId(7), Duration::from_millis(30));
        timers.start(ObjectId(2), Duration::from_millis(20));

        let fired = timers.advance(Duration::from_millis(60));
        assert_eq!(
            fired,
            vec![
                ObjectId(2), // 20
                ObjectId(7), // 30
                ObjectId(2), // 40
                ObjectId(7), // 60, started first
                ObjectId(2), // 60
            ]
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = ManualTimers::new();
        let handle = timers.start(ObjectId(1), Duration::from_millis(10));
        timers.cancel(handle);

        assert!(timers.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(timers.active(), 0);
    }
}
