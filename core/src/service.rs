//! The closed enumeration of service categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a service request.
///
/// Determines which pricing tariff and directory adapter apply. Immutable
/// after request creation. Wire names are kebab-case (`car-rental`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Shared ride between private parties.
    Carpool,
    /// Short-term scooter hire.
    Scooter,
    /// Point-to-point package delivery.
    Package,
    /// Recurring school transport.
    School,
    /// Laundry pickup, processing, and return.
    Laundry,
    /// Non-emergency medical transport.
    Medical,
    /// Pet transport.
    Pet,
    /// Premium chauffeured ride.
    Luxury,
    /// Palletized freight haulage.
    Freight,
    /// Multi-day vehicle rental.
    CarRental,
    /// Fixed-route shared shuttle.
    Shuttle,
    /// Hospitality stay booking.
    Hospitality,
}

impl ServiceType {
    /// All service types, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Carpool,
        Self::Scooter,
        Self::Package,
        Self::School,
        Self::Laundry,
        Self::Medical,
        Self::Pet,
        Self::Luxury,
        Self::Freight,
        Self::CarRental,
        Self::Shuttle,
        Self::Hospitality,
    ];

    /// The kebab-case wire name of this service type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carpool => "carpool",
            Self::Scooter => "scooter",
            Self::Package => "package",
            Self::School => "school",
            Self::Laundry => "laundry",
            Self::Medical => "medical",
            Self::Pet => "pet",
            Self::Luxury => "luxury",
            Self::Freight => "freight",
            Self::CarRental => "car-rental",
            Self::Shuttle => "shuttle",
            Self::Hospitality => "hospitality",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| crate::error::Error::InvalidRequest {
                reason: format!("unknown service type: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for ty in ServiceType::ALL {
            assert_eq!(ty.as_str().parse::<ServiceType>().unwrap(), ty);
        }
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&ServiceType::CarRental).unwrap();
        assert_eq!(json, "\"car-rental\"");
    }

    #[test]
    fn unknown_name_is_invalid_request() {
        let err = "hoverboard".parse::<ServiceType>().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InvalidRequest { .. }
        ));
    }
}
