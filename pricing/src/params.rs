//! Pricing input parameters, one variant per service type.
//!
//! Where the original loosely-typed parameter bags could silently omit a
//! required field, the typed variants make "missing field" unrepresentable;
//! what remains for validation is ranges and the params/service-type match.

use crate::error::{invalid_parameters, positive_finite, within};
use serde::{Deserialize, Serialize};
use wayfare_core::details::{LaundryMode, LuxuryTier, PackageSize, VehicleClass};
use wayfare_core::{ProviderId, Result, ServiceType};

/// Parameters for a pricing quote.
///
/// Required fields are service-type-specific; the variant must match the
/// service type being priced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QuoteParams {
    /// Carpool: distance and requested seats (total splits evenly).
    Carpool {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Seats requested.
        seats: u32,
    },
    /// Scooter: metered by time and distance.
    Scooter {
        /// Ride distance in kilometers.
        distance_km: f64,
        /// Ride duration in minutes.
        duration_min: f64,
    },
    /// Package delivery: size band plus distance.
    Package {
        /// Delivery distance in kilometers.
        distance_km: f64,
        /// Package size band.
        size: PackageSize,
    },
    /// School route: distance plus riding students (total splits evenly).
    School {
        /// Route distance in kilometers.
        distance_km: f64,
        /// Students riding.
        students: u32,
    },
    /// Laundry: load weight, processing mode, and the processing partner.
    Laundry {
        /// Load weight in kilograms.
        load_weight_kg: f64,
        /// Processing mode.
        mode: LaundryMode,
        /// The partner facility taking the load.
        partner_id: ProviderId,
    },
    /// Medical transport: distance plus optional assistance.
    Medical {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Trained assistance on board.
        assistance: bool,
    },
    /// Pet transport: distance plus crate handling.
    Pet {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Crate provided and handled.
        crated: bool,
    },
    /// Luxury ride: distance at a service tier.
    Luxury {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Service tier.
        tier: LuxuryTier,
    },
    /// Freight: distance plus cargo weight.
    Freight {
        /// Haul distance in kilometers.
        distance_km: f64,
        /// Cargo weight in kilograms.
        cargo_weight_kg: f64,
    },
    /// Car rental: term and vehicle class.
    CarRental {
        /// Rental term in days.
        days: u32,
        /// Vehicle class.
        vehicle_class: VehicleClass,
    },
    /// Shuttle: distance and seats (total splits evenly).
    Shuttle {
        /// Route distance in kilometers.
        distance_km: f64,
        /// Seats requested.
        seats: u32,
    },
    /// Hospitality stay: guests and nights.
    Hospitality {
        /// Guests staying.
        guests: u32,
        /// Nights booked.
        nights: u32,
    },
}

impl QuoteParams {
    /// The service type these parameters price.
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        match self {
            Self::Carpool { .. } => ServiceType::Carpool,
            Self::Scooter { .. } => ServiceType::Scooter,
            Self::Package { .. } => ServiceType::Package,
            Self::School { .. } => ServiceType::School,
            Self::Laundry { .. } => ServiceType::Laundry,
            Self::Medical { .. } => ServiceType::Medical,
            Self::Pet { .. } => ServiceType::Pet,
            Self::Luxury { .. } => ServiceType::Luxury,
            Self::Freight { .. } => ServiceType::Freight,
            Self::CarRental { .. } => ServiceType::CarRental,
            Self::Shuttle { .. } => ServiceType::Shuttle,
            Self::Hospitality { .. } => ServiceType::Hospitality,
        }
    }

    /// Validate numeric ranges for this variant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameters` naming the first out-of-range field.
    /// Never substitutes a default for a bad value.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Carpool { distance_km, seats } | Self::Shuttle { distance_km, seats } => {
                positive_finite(*distance_km, "distance_km")?;
                within(*distance_km, 10_000.0, "distance_km")?;
                if *seats == 0 {
                    return Err(invalid_parameters("seats", "must be at least 1"));
                }
                Ok(())
            },
            Self::Scooter {
                distance_km,
                duration_min,
            } => {
                positive_finite(*distance_km, "distance_km")?;
                within(*distance_km, 200.0, "distance_km")?;
                positive_finite(*duration_min, "duration_min")?;
                within(*duration_min, 1_440.0, "duration_min")
            },
            Self::Package { distance_km, .. }
            | Self::Medical { distance_km, .. }
            | Self::Pet { distance_km, .. }
            | Self::Luxury { distance_km, .. } => {
                positive_finite(*distance_km, "distance_km")?;
                within(*distance_km, 10_000.0, "distance_km")
            },
            Self::School {
                distance_km,
                students,
            } => {
                positive_finite(*distance_km, "distance_km")?;
                within(*distance_km, 500.0, "distance_km")?;
                if *students == 0 {
                    return Err(invalid_parameters("students", "must be at least 1"));
                }
                Ok(())
            },
            Self::Laundry { load_weight_kg, .. } => {
                positive_finite(*load_weight_kg, "load_weight_kg")?;
                within(*load_weight_kg, 100.0, "load_weight_kg")
            },
            Self::Freight {
                distance_km,
                cargo_weight_kg,
            } => {
                positive_finite(*distance_km, "distance_km")?;
                within(*distance_km, 10_000.0, "distance_km")?;
                positive_finite(*cargo_weight_kg, "cargo_weight_kg")?;
                within(*cargo_weight_kg, 30_000.0, "cargo_weight_kg")
            },
            Self::CarRental { days, .. } => {
                if *days == 0 {
                    return Err(invalid_parameters("days", "must be at least 1"));
                }
                Ok(())
            },
            Self::Hospitality { guests, nights } => {
                if *guests == 0 {
                    return Err(invalid_parameters("guests", "must be at least 1"));
                }
                if *nights == 0 {
                    return Err(invalid_parameters("nights", "must be at least 1"));
                }
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use wayfare_core::Error;

    #[test]
    fn negative_distance_is_rejected() {
        let params = QuoteParams::Carpool {
            distance_km: -5.0,
            seats: 1,
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParameters {
                field: "distance_km",
                ..
            })
        ));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let params = QuoteParams::Laundry {
            load_weight_kg: 0.0,
            mode: LaundryMode::WashFold,
            partner_id: ProviderId::new("laundro-9"),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn nan_duration_is_rejected() {
        let params = QuoteParams::Scooter {
            distance_km: 2.0,
            duration_min: f64::NAN,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn variant_tags_match_service_types() {
        let params = QuoteParams::CarRental {
            days: 3,
            vehicle_class: VehicleClass::Suv,
        };
        assert_eq!(params.service_type(), ServiceType::CarRental);
    }
}
