//! Injected dependencies.
//!
//! All external facilities are abstracted behind traits and handed to
//! components at construction, never reached through globals. Time is the
//! one facility every component needs: peak-window pricing and stage
//! timestamps must be deterministically testable.

use chrono::{DateTime, Utc};

/// Clock abstraction.
///
/// Production uses [`SystemClock`]; tests inject a fixed or stepping clock
/// from `wayfare-testing`.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock, backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
