//! Deferred work owned by the engine.
//!
//! The engine is single-threaded: nothing runs "later" on its own. Work
//! that must happen after a delay is queued here with a due time and
//! fired by `GameEngine::advance_to` once time has moved past it.
//!
//! ## Behavior
//!
//! - Tasks fire in due order; ties fire in scheduling order
//! - `cancel()` removes a task that has not fired yet
//! - One-shot tasks are never cancelled by the engine; their guards make a
//!   late firing harmless

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::Millis;

/// Work the engine can defer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// One period of the elapsed-time counter.
    ClockTick,

    /// Hide a mismatched pair again.
    ///
    /// Carries the pair and the deal it belongs to, captured when the
    /// mismatch happened. Re-checked against live state when it fires.
    FlipBack { pair: [CardId; 2], deal: u64 },

    /// Phase 2 of a reset: deal a fresh deck.
    FinishReset,
}

/// Handle to a scheduled task, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle {
    due: Millis,
    seq: u64,
}

impl TaskHandle {
    /// When the task is due.
    #[must_use]
    pub fn due(self) -> Millis {
        self.due
    }
}

/// Queue of deferred tasks, ordered by due time.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<TaskHandle, Task>,
    next_seq: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire at `due`.
    pub fn schedule(&mut self, due: Millis, task: Task) -> TaskHandle {
        let handle = TaskHandle {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(handle, task);
        handle
    }

    /// Remove a task before it fires.
    ///
    /// Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.queue.remove(&handle).is_some()
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|h| h.due)
    }

    /// Take the earliest task if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TaskHandle, Task)> {
        let (&handle, _) = self.queue.iter().next()?;
        if handle.due > now {
            return None;
        }
        self.queue.remove(&handle).map(|task| (handle, task))
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Is the queue empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued tasks matching `pred`.
    #[must_use]
    pub fn count_where(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.queue.values().filter(|t| pred(t)).count()
    }
}
