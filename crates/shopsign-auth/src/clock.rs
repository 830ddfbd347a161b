//! Time source for session token validity checks.

use chrono::{DateTime, Utc};

/// Source of the current time as whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// The current time in seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock frozen at a fixed instant. Used to make expiry checks deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl From<DateTime<Utc>> for FixedClock {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp())
    }
}
