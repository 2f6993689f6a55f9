//! Time source for release checks.

use crate::types::Timestamp;
use chrono::Utc;

/// Supplies "now" to the gate. Sampled once per decision.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Clock pinned to a single instant. Used for reproducible checks
/// (`--at` on the CLI) and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
