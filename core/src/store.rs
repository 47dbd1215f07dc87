//! The durable request store abstraction.
//!
//! Deliberately minimal: insert, point lookup, and one conditional write.
//! The conditional write is what makes the state machine safe under
//! concurrent controllers: a transition lands only if the stored state
//! still matches the precondition the caller validated against, so
//! read-then-blind-write lost updates cannot happen. Losing the condition
//! is an *outcome* the controller classifies (idempotent no-op vs
//! `InvalidStateTransition`), not an error.
//!
//! # Implementations
//!
//! - `PostgresRequestStore` (in `wayfare-postgres`): production, one
//!   conditional `UPDATE` per transition
//! - `InMemoryRequestStore` (in `wayfare-testing`): mutex-serialized map
//!   with identical semantics

use crate::error::Result;
use crate::ids::RequestId;
use crate::request::{RequestState, ServiceRequest};
use async_trait::async_trait;

/// Result of a conditional write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The stored state matched and the record was replaced.
    Applied,
    /// The stored state no longer matched; nothing was written. The caller
    /// re-reads and decides.
    StateMismatch,
}

/// Durable, queryable record store for [`ServiceRequest`]s.
///
/// Implementations must be `Send + Sync`; every method persists (or reads)
/// durably before returning, so a caller never observes an uncommitted
/// state. Requests are never physically deleted; terminal states stay on
/// record.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert a freshly created request.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` when the underlying store cannot be reached.
    async fn insert(&self, request: &ServiceRequest) -> Result<()>;

    /// Point lookup by id. Absent ids yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` when the underlying store cannot be reached.
    async fn fetch(&self, id: RequestId) -> Result<Option<ServiceRequest>>;

    /// Replace the stored record with `updated` only if the stored state
    /// still equals `expected`. Atomic with respect to concurrent calls for
    /// the same id. An absent id counts as a mismatch (nothing to match
    /// against); callers that need to distinguish re-fetch.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` when the underlying store cannot be reached.
    async fn update_if_state(
        &self,
        expected: RequestState,
        updated: &ServiceRequest,
    ) -> Result<UpdateOutcome>;
}
