//! Game configuration.
//!
//! The engine never hardcodes its delays. Callers configure them once via
//! `GameConfig` and the engine reads them whenever it schedules work:
//! - `flip_back_delay`: how long a mismatched pair stays face-up
//! - `reset_delay`: how long the cosmetic flip of a reset lasts
//! - `tick_interval`: period of the elapsed-time counter
//! - `min_kinds`: smallest deck (in kinds) accepted as playable

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default delay before a mismatched pair is flipped back.
pub const DEFAULT_FLIP_BACK_DELAY: Duration = Duration::from_millis(1000);

/// Default delay between the cosmetic reset flip and the new deal.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(600);

/// Default period of the elapsed-time counter.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Delay before two mismatched cards are hidden again.
    pub flip_back_delay: Duration,

    /// Delay between reset phase 1 (flip) and phase 2 (new deal).
    pub reset_delay: Duration,

    /// Period between two increments of `elapsed_seconds`.
    pub tick_interval: Duration,

    /// Minimum number of distinct kinds for a playable deck (at least 2).
    pub min_kinds: usize,

    /// Seed for dealing. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flip_back_delay: DEFAULT_FLIP_BACK_DELAY,
            reset_delay: DEFAULT_RESET_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            min_kinds: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch flip-back delay.
    #[must_use]
    pub fn with_flip_back_delay(mut self, delay: Duration) -> Self {
        self.flip_back_delay = delay;
        self
    }

    /// Set the reset delay.
    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Set the clock tick interval.
    ///
    /// Panics on a zero interval, which would make the clock spin forever.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be non-zero");
        self.tick_interval = interval;
        self
    }

    /// Set the minimum number of kinds. Values below 2 are raised to 2.
    #[must_use]
    pub fn with_min_kinds(mut self, min_kinds: usize) -> Self {
        self.min_kinds = min_kinds.max(2);
        self
    }

    /// Use a fixed seed for dealing.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
