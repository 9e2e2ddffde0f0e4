//! Millisecond timestamps.
//!
//! The engine never reads a clock itself. Callers pass the current time as
//! a `Millis` value, which keeps scheduling deterministic under test.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A point in time, in milliseconds since an arbitrary caller-chosen origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Millis(pub u64);

impl Millis {
    /// The origin.
    pub const ZERO: Millis = Millis(0);

    /// Create a timestamp.
    #[must_use]
    pub const fn new(ms: u64) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Timestamp `delay` after this one (saturating).
    #[must_use]
    pub fn after(self, delay: Duration) -> Self {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(delay_ms))
    }
}

impl From<u64> for Millis {
    fn from(ms: u64) -> Self {
        Self(ms)
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after() {
        let t = Millis::new(250);
        assert_eq!(t.after(Duration::from_millis(1000)), Millis::new(1250));
        assert_eq!(Millis::new(u64::MAX).after(Duration::from_secs(1)), Millis::new(u64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Millis::new(42)), "42ms");
    }
}
