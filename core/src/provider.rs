//! The externally-owned provider read model and the filter vocabulary used
//! to search it. The core never mutates providers; it only queries them
//! through a directory adapter.

use crate::ids::ProviderId;
use crate::request::GeoPoint;
use crate::service::ServiceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resource eligible to fulfill requests: a driver, a scooter, a partner
/// business, a captain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// External identifier.
    pub id: ProviderId,
    /// The single service type this provider serves.
    pub service_type: ServiceType,
    /// Last known location.
    pub location: GeoPoint,
    /// Aggregate rating, 0.0 to 5.0.
    pub rating: f64,
    /// Seats, kilograms, or loads this provider can take on.
    pub capacity: u32,
    /// Whether the provider is currently taking work.
    pub available: bool,
    /// Free-form attributes (vehicle type, certifications, ...). Sorted map
    /// so serialized provider records are stable.
    pub attributes: BTreeMap<String, String>,
}

/// Filter criteria for a directory search.
///
/// `location` + `radius_km` bound the search geographically for
/// location-bound services. `attributes` are exact-match constraints; an
/// adapter that cannot express a given attribute ignores it (documented per
/// adapter).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderFilter {
    /// Center of the search area.
    pub location: Option<GeoPoint>,
    /// Search radius around `location` in kilometers.
    pub radius_km: Option<f64>,
    /// Minimum acceptable rating.
    pub min_rating: Option<f64>,
    /// Only providers currently taking work. Defaults to true.
    pub available_only: bool,
    /// Exact-match attribute constraints.
    pub attributes: BTreeMap<String, String>,
}

impl ProviderFilter {
    /// A filter that only requires availability.
    #[must_use]
    pub fn any_available() -> Self {
        Self {
            available_only: true,
            ..Self::default()
        }
    }

    /// Bound the search to `radius_km` around `location`.
    #[must_use]
    pub fn near(location: GeoPoint, radius_km: f64) -> Self {
        Self {
            location: Some(location),
            radius_km: Some(radius_km),
            available_only: true,
            ..Self::default()
        }
    }

    /// Require at least this rating.
    #[must_use]
    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Add an exact-match attribute constraint.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
