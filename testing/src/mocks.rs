//! Mock implementations of the Wayfare environment traits.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use wayfare_core::{
    Clock, Error, Provider, ProviderFilter, RequestId, RequestState, RequestStore, Result,
    ServiceRequest, ServiceType, UpdateOutcome,
};
use wayfare_directory::{DirectoryAdapter, matches_filter};

// ============================================================================
// Clocks
// ============================================================================

/// Fixed clock for deterministic tests: always returns the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a fixed clock pinned to `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Clock that advances by a fixed step on every `now()` call, so
/// consecutive stage timestamps are strictly ordered in tests.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    step_seconds: i64,
    ticks: AtomicI64,
}

impl SteppingClock {
    /// Create a clock starting at `start` that advances `step_seconds` per
    /// call.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, step_seconds: i64) -> Self {
        Self {
            start,
            step_seconds,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick * self.step_seconds)
    }
}

// ============================================================================
// Stores
// ============================================================================

/// In-memory request store with the production conditional-write contract.
///
/// All methods serialize on one mutex, so `update_if_state` is atomic with
/// respect to concurrent calls: two racing transitions for the same id
/// see exactly one `Applied` and one `StateMismatch`, as with the Postgres
/// store.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: Mutex<HashMap<RequestId, ServiceRequest>>,
}

impl InMemoryRequestStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock was poisoned by a panicking test thread.
    #[must_use]
    #[allow(clippy::unwrap_used)] // Lock poisoning only follows a prior test panic
    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Whether the store holds no requests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(clippy::unwrap_used)] // Lock poisoning only follows a prior test panic
#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn insert(&self, request: &ServiceRequest) -> Result<()> {
        self.requests
            .lock()
            .unwrap()
            .insert(request.id, request.clone());
        Ok(())
    }

    async fn fetch(&self, id: RequestId) -> Result<Option<ServiceRequest>> {
        Ok(self.requests.lock().unwrap().get(&id).cloned())
    }

    async fn update_if_state(
        &self,
        expected: RequestState,
        updated: &ServiceRequest,
    ) -> Result<UpdateOutcome> {
        let mut requests = self.requests.lock().unwrap();
        match requests.get(&updated.id) {
            Some(stored) if stored.state == expected => {
                requests.insert(updated.id, updated.clone());
                Ok(UpdateOutcome::Applied)
            },
            _ => Ok(UpdateOutcome::StateMismatch),
        }
    }
}

/// A store that is always unreachable. Every call fails with
/// `StoreUnavailable`.
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait]
impl RequestStore for UnavailableStore {
    async fn insert(&self, _request: &ServiceRequest) -> Result<()> {
        Err(unavailable())
    }

    async fn fetch(&self, _id: RequestId) -> Result<Option<ServiceRequest>> {
        Err(unavailable())
    }

    async fn update_if_state(
        &self,
        _expected: RequestState,
        _updated: &ServiceRequest,
    ) -> Result<UpdateOutcome> {
        Err(unavailable())
    }
}

fn unavailable() -> Error {
    Error::StoreUnavailable {
        reason: "store is offline (test double)".into(),
    }
}

// ============================================================================
// Directory adapters
// ============================================================================

/// Directory adapter over a fixed provider list, filtered in process with
/// the shared predicate. Honors every filter field.
#[derive(Debug, Clone)]
pub struct StaticDirectoryAdapter {
    service_type: ServiceType,
    providers: Vec<Provider>,
}

impl StaticDirectoryAdapter {
    /// Serve `providers` for `service_type`.
    #[must_use]
    pub const fn new(service_type: ServiceType, providers: Vec<Provider>) -> Self {
        Self {
            service_type,
            providers,
        }
    }

    /// An adapter that always returns no candidates.
    #[must_use]
    pub const fn empty(service_type: ServiceType) -> Self {
        Self::new(service_type, Vec::new())
    }
}

#[async_trait]
impl DirectoryAdapter for StaticDirectoryAdapter {
    fn service_type(&self) -> ServiceType {
        self.service_type
    }

    async fn search(&self, filter: &ProviderFilter) -> Result<Vec<Provider>> {
        Ok(self
            .providers
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect())
    }
}

/// A directory adapter whose backing store is always unreachable.
#[derive(Debug, Clone, Copy)]
pub struct UnavailableAdapter(pub ServiceType);

#[async_trait]
impl DirectoryAdapter for UnavailableAdapter {
    fn service_type(&self) -> ServiceType {
        self.0
    }

    async fn search(&self, _filter: &ProviderFilter) -> Result<Vec<Provider>> {
        Err(Error::DirectoryUnavailable {
            reason: "directory is offline (test double)".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use crate::provider;
    use wayfare_core::GeoPoint;

    #[test]
    fn stepping_clock_is_strictly_increasing() {
        let clock = SteppingClock::new(Utc::now(), 5);
        let first = clock.now();
        let second = clock.now();
        assert!(first < second);
        assert_eq!((second - first).num_seconds(), 5);
    }

    #[tokio::test]
    async fn conditional_update_requires_matching_state() {
        use wayfare_core::{RequesterId, Schedule, ServiceDetails};

        let store = InMemoryRequestStore::new();
        let mut request = ServiceRequest {
            id: RequestId::new(),
            service_type: ServiceType::Carpool,
            requester_id: RequesterId::new("rider-1"),
            origin: None,
            destination: None,
            schedule: Schedule::asap(),
            details: ServiceDetails::Carpool {
                seats: 1,
                luggage_pieces: 0,
            },
            state: RequestState::Pending,
            provider_id: None,
            price_breakdown: None,
            settlement: None,
            cancellation_reason: None,
            created_at: Utc::now(),
            assigned_at: None,
            confirmed_at: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
        };
        store.insert(&request).await.unwrap();

        request.state = RequestState::Assigned;
        let outcome = store
            .update_if_state(RequestState::Pending, &request)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        // The stored state is now `assigned`; a stale pending-based write
        // must not land.
        let stale = store
            .update_if_state(RequestState::Pending, &request)
            .await
            .unwrap();
        assert_eq!(stale, UpdateOutcome::StateMismatch);
    }

    #[tokio::test]
    async fn static_adapter_filters_with_shared_predicate() {
        let adapter = StaticDirectoryAdapter::new(
            ServiceType::Carpool,
            vec![provider("drv-1", ServiceType::Carpool, GeoPoint::new(25.2, 55.27))],
        );
        let found = adapter.search(&ProviderFilter::any_available()).await.unwrap();
        assert_eq!(found.len(), 1);

        let strict = ProviderFilter::any_available().with_min_rating(4.9);
        assert!(adapter.search(&strict).await.unwrap().is_empty());
    }
}
