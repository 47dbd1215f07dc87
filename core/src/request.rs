//! The central `ServiceRequest` entity and its state machine vocabulary.

use crate::details::ServiceDetails;
use crate::ids::{ProviderId, RequestId, RequesterId};
use crate::price::{PriceBreakdown, Settlement};
use crate::service::ServiceType;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Geography and scheduling
// ============================================================================

/// A geographic point with an optional free-text address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Free-text address, when known.
    pub address: Option<String>,
}

impl GeoPoint {
    /// Create a point from coordinates, without an address.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }
}

/// When the service should happen. Both fields absent means "as soon as
/// possible".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Requested date, when scheduled ahead.
    pub date: Option<NaiveDate>,
    /// Requested time of day, when scheduled ahead.
    pub time: Option<NaiveTime>,
}

impl Schedule {
    /// An unscheduled, as-soon-as-possible request.
    #[must_use]
    pub const fn asap() -> Self {
        Self {
            date: None,
            time: None,
        }
    }

    /// Whether this request is as-soon-as-possible.
    #[must_use]
    pub const fn is_asap(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

// ============================================================================
// Request state
// ============================================================================

/// The lifecycle state of a service request.
///
/// States advance monotonically along
/// `pending → assigned → confirmed → active → completed`; `cancelled` is
/// reachable from pending, assigned, and confirmed only. `completed` and
/// `cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestState {
    /// Created, no provider bound yet.
    Pending,
    /// A provider is bound.
    Assigned,
    /// Payment/commitment intent recorded.
    Confirmed,
    /// Service underway.
    Active,
    /// Service finished; settlement attached. Terminal.
    Completed,
    /// Withdrawn before execution. Terminal.
    Cancelled,
}

impl RequestState {
    /// Whether no further transition is permitted from this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the universal `cancel` escape is permitted from this state.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::Confirmed)
    }

    /// The kebab-case wire name of this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Confirmed => "confirmed",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ServiceRequest
// ============================================================================

/// The central entity: one row per logical request, mutated in place by the
/// lifecycle controller's transition operations and never physically
/// deleted.
///
/// Invariants maintained by the controller:
///
/// - `provider_id` is `Some` iff `state` is assigned/confirmed/active/completed
///   (cancellation releases the binding)
/// - each stage timestamp is set exactly once, by its transition
/// - `price_breakdown` holds the last computed quote; it is replaced, never
///   accumulated
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    /// Opaque unique identifier, assigned at creation.
    pub id: RequestId,
    /// The service category; immutable after creation.
    pub service_type: ServiceType,
    /// The initiating party; immutable.
    pub requester_id: RequesterId,
    /// Trip origin, for trip-like services.
    pub origin: Option<GeoPoint>,
    /// Trip destination; may be absent for subscription-style services.
    pub destination: Option<GeoPoint>,
    /// Requested date/time; as-soon-as-possible when empty.
    pub schedule: Schedule,
    /// Service-type-specific attributes, validated at creation.
    pub details: ServiceDetails,
    /// Current lifecycle state.
    pub state: RequestState,
    /// Bound provider; `None` until `assign`.
    pub provider_id: Option<ProviderId>,
    /// Last computed quote; authoritative once confirmed.
    pub price_breakdown: Option<PriceBreakdown>,
    /// Final actuals, attached at completion.
    pub settlement: Option<Settlement>,
    /// Why the request was cancelled, when it was.
    pub cancellation_reason: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When a provider was bound.
    pub assigned_at: Option<DateTime<Utc>>,
    /// When commitment was recorded.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When execution began.
    pub started_at: Option<DateTime<Utc>>,
    /// When execution finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// When the request was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(RequestState::Completed.is_terminal());
        assert!(RequestState::Cancelled.is_terminal());
        assert!(!RequestState::Active.is_terminal());
        assert!(!RequestState::Pending.is_terminal());
    }

    #[test]
    fn cancellation_boundary_excludes_active_and_terminal() {
        assert!(RequestState::Pending.is_cancellable());
        assert!(RequestState::Assigned.is_cancellable());
        assert!(RequestState::Confirmed.is_cancellable());
        assert!(!RequestState::Active.is_cancellable());
        assert!(!RequestState::Completed.is_cancellable());
        assert!(!RequestState::Cancelled.is_cancellable());
    }

    #[test]
    fn empty_schedule_is_asap() {
        assert!(Schedule::asap().is_asap());
        let scheduled = Schedule {
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
            time: None,
        };
        assert!(!scheduled.is_asap());
    }
}
