//! # Wayfare Lifecycle
//!
//! The request lifecycle controller: the one component that mutates
//! [`ServiceRequest`](wayfare_core::ServiceRequest) state. It owns the
//! seven-stage machine
//!
//! ```text
//! create → price → assign → confirm → execute → complete
//!                     (cancel from pending/assigned/confirmed)
//! ```
//!
//! and persists every transition durably before returning. The pricing
//! engine and provider directory are read-only collaborators; their results
//! are incorporated here, never written by them.
//!
//! ## Concurrency
//!
//! No state is cached in process between calls: every operation re-reads
//! the current record, validates its precondition, and lands through the
//! store's conditional write. Two callers racing the same transition see
//! exactly one success; the loser observes `InvalidStateTransition` after
//! re-reading (or a no-op success when the race produced the identical
//! outcome, which makes failed-call retries safe). Controllers scale
//! horizontally with no coordination beyond the store.

mod controller;

pub use controller::{LifecycleController, NewRequest};
