//! # Wayfare Testing
//!
//! Test doubles for the Wayfare orchestrator:
//!
//! - [`mocks::FixedClock`] / [`mocks::SteppingClock`]: deterministic time
//! - [`mocks::InMemoryRequestStore`]: mutex-serialized map with the same
//!   conditional-write semantics as the Postgres store
//! - [`mocks::StaticDirectoryAdapter`]: a fixed provider list filtered by
//!   the shared predicate
//! - [`mocks::UnavailableStore`] / [`mocks::UnavailableAdapter`]: always
//!   fail with the transient infrastructure errors, for error-path tests
//!
//! ## Example
//!
//! ```
//! use wayfare_testing::mocks::FixedClock;
//! use wayfare_core::Clock;
//! use chrono::Utc;
//!
//! let clock = FixedClock::new(Utc::now());
//! assert_eq!(clock.now(), clock.now());
//! ```

pub mod mocks;

pub use mocks::{
    FixedClock, InMemoryRequestStore, SteppingClock, StaticDirectoryAdapter, UnavailableAdapter,
    UnavailableStore,
};

use std::collections::BTreeMap;
use wayfare_core::{GeoPoint, Provider, ProviderId, ServiceType};

/// Build an available provider at `location` with sensible defaults.
#[must_use]
pub fn provider(id: &str, service_type: ServiceType, location: GeoPoint) -> Provider {
    Provider {
        id: ProviderId::new(id),
        service_type,
        location,
        rating: 4.5,
        capacity: 4,
        available: true,
        attributes: BTreeMap::new(),
    }
}

/// Install a compact tracing subscriber for a test run; repeated calls are
/// no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
