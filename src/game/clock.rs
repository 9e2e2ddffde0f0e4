//! Elapsed-time counter.
//!
//! The clock owns the handle of its repeating tick. There is never more
//! than one tick task in the scheduler: `start` refuses while one exists
//! and every fired tick schedules exactly one successor.

use std::time::Duration;

use serde::Serialize;

use super::scheduler::{Scheduler, Task, TaskHandle};
use crate::core::Millis;

/// Start time, elapsed seconds and the active tick, if any.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GameClock {
    start_time: Option<Millis>,
    elapsed_seconds: u64,
    #[serde(skip)]
    tick: Option<TaskHandle>,
}

impl GameClock {
    /// A clock that has not started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When the game started, `None` before start and after reset.
    #[must_use]
    pub fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    /// Whole seconds counted so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Is a tick currently scheduled?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Record the start time and schedule the first tick.
    ///
    /// Returns `false` without touching anything if the clock was already
    /// started.
    pub fn start(&mut self, now: Millis, interval: Duration, scheduler: &mut Scheduler) -> bool {
        if self.start_time.is_some() || self.tick.is_some() {
            return false;
        }
        self.start_time = Some(now);
        self.tick = Some(scheduler.schedule(now.after(interval), Task::ClockTick));
        true
    }

    /// Count one period and schedule the next tick.
    ///
    /// A tick that is not the active one is ignored and returns `false`.
    pub fn on_tick(&mut self, fired: TaskHandle, interval: Duration, scheduler: &mut Scheduler) -> bool {
        if self.tick != Some(fired) {
            return false;
        }
        self.elapsed_seconds += 1;
        self.tick = Some(scheduler.schedule(fired.due().after(interval), Task::ClockTick));
        true
    }

    /// Cancel the active tick. Idempotent.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.tick.take() {
            scheduler.cancel(handle);
        }
    }

    /// Stop and forget the start time and count.
    pub fn clear(&mut self, scheduler: &mut Scheduler) {
        self.stop(scheduler);
        self.start_time = None;
        self.elapsed_seconds = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn run_until(clock: &mut GameClock, scheduler: &mut Scheduler, now: Millis) {
        while let Some((handle, task)) = scheduler.pop_due(now) {
            assert_eq!(task, Task::ClockTick);
            clock.on_tick(handle, SECOND, scheduler);
        }
    }

    #[test]
    fn test_counts_whole_seconds() {
        let mut scheduler = Scheduler::new();
        let mut clock = GameClock::new();

        assert!(clock.start(Millis::new(500), SECOND, &mut scheduler));
        assert_eq!(clock.start_time(), Some(Millis::new(500)));

        run_until(&mut clock, &mut scheduler, Millis::new(1499));
        assert_eq!(clock.elapsed_seconds(), 0);

        run_until(&mut clock, &mut scheduler, Millis::new(3500));
        assert_eq!(clock.elapsed_seconds(), 3);
    }

    #[test]
    fn test_second_start_rejected() {
        let mut scheduler = Scheduler::new();
        let mut clock = GameClock::new();

        assert!(clock.start(Millis::new(0), SECOND, &mut scheduler));
        assert!(!clock.start(Millis::new(10), SECOND, &mut scheduler));

        assert_eq!(clock.start_time(), Some(Millis::new(0)));
        assert_eq!(scheduler.count_where(|t| *t == Task::ClockTick), 1);
    }

    #[test]
    fn test_stop_freezes_count() {
        let mut scheduler = Scheduler::new();
        let mut clock = GameClock::new();
        clock.start(Millis::new(0), SECOND, &mut scheduler);
        run_until(&mut clock, &mut scheduler, Millis::new(2000));

        clock.stop(&mut scheduler);
        clock.stop(&mut scheduler);
        run_until(&mut clock, &mut scheduler, Millis::new(10_000));

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed_seconds(), 2);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        let mut clock = GameClock::new();
        clock.start(Millis::new(0), SECOND, &mut scheduler);
        run_until(&mut clock, &mut scheduler, Millis::new(4000));

        clock.clear(&mut scheduler);

        assert_eq!(clock.start_time(), None);
        assert_eq!(clock.elapsed_seconds(), 0);
        assert!(!clock.is_running());
        assert!(clock.start(Millis::new(5000), SECOND, &mut scheduler));
    }
}
