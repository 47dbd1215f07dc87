//! Service-type-specific request details.
//!
//! The source of truth for "what does this request actually need" is a
//! tagged union keyed by service type: each variant carries its own
//! strongly-typed field set, and validation happens once, at creation,
//! rather than scattered across call sites.

use crate::error::{Error, Result};
use crate::ids::ProviderId;
use crate::service::ServiceType;
use serde::{Deserialize, Serialize};

/// Package size band, used for size-banded delivery pricing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageSize {
    /// Fits a courier bag.
    Small,
    /// Fits a car trunk.
    Medium,
    /// Needs a van.
    Large,
}

/// Laundry processing mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaundryMode {
    /// Standard wash and fold.
    WashFold,
    /// Dry cleaning.
    DryClean,
    /// Same-day express.
    Express,
}

/// Luxury service tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LuxuryTier {
    /// Premium sedan.
    Premium,
    /// Elite chauffeured class.
    Elite,
}

/// Rental vehicle class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleClass {
    /// Compact economy car.
    Economy,
    /// Standard sedan.
    Standard,
    /// Sport utility vehicle.
    Suv,
    /// Passenger or cargo van.
    Van,
}

/// The service-type-specific attribute bag of a request.
///
/// Tagged by service type; [`ServiceDetails::validate`] is the single
/// boundary check, invoked by the lifecycle controller at `create`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ServiceDetails {
    /// Shared ride details.
    Carpool {
        /// Seats requested, 1 to 8.
        seats: u32,
        /// Luggage pieces to accommodate.
        luggage_pieces: u32,
    },
    /// Scooter hire details.
    Scooter {
        /// Estimated hire duration in minutes, 1 to 480.
        estimated_duration_min: u32,
    },
    /// Package delivery details.
    Package {
        /// Size band.
        size: PackageSize,
        /// Package weight in kilograms.
        weight_kg: f64,
        /// Whether the contents need careful handling.
        fragile: bool,
        /// Who receives the package.
        recipient_name: String,
    },
    /// School transport details.
    School {
        /// Students riding, at least 1.
        students: u32,
        /// Grade or year label.
        grade: String,
        /// Guardian contact for pickup/dropoff confirmation.
        guardian_contact: String,
        /// Whether this is a recurring route subscription.
        recurring: bool,
    },
    /// Laundry pickup details.
    Laundry {
        /// Load weight in kilograms.
        load_weight_kg: f64,
        /// Processing mode.
        mode: LaundryMode,
        /// The partner facility that processes the load.
        partner_id: ProviderId,
    },
    /// Medical transport details.
    Medical {
        /// Wheelchair-accessible vehicle required.
        wheelchair: bool,
        /// An escort accompanies the passenger.
        escort_required: bool,
        /// Optional clinic appointment reference.
        appointment_reference: Option<String>,
    },
    /// Pet transport details.
    Pet {
        /// Animal species.
        species: String,
        /// Whether the animal travels crated.
        crated: bool,
        /// Animal weight in kilograms.
        weight_kg: f64,
    },
    /// Luxury ride details.
    Luxury {
        /// Service tier.
        tier: LuxuryTier,
        /// Passengers riding, 1 to 4.
        passengers: u32,
    },
    /// Freight haulage details.
    Freight {
        /// Cargo weight in kilograms.
        cargo_weight_kg: f64,
        /// Pallet count, at least 1.
        pallets: u32,
        /// Hazardous-goods handling required.
        hazardous: bool,
    },
    /// Vehicle rental details.
    CarRental {
        /// Rental term in days, at least 1.
        days: u32,
        /// Vehicle class.
        vehicle_class: VehicleClass,
        /// Renter's licence number.
        driver_license: String,
    },
    /// Shuttle seat details.
    Shuttle {
        /// Seats requested, at least 1.
        seats: u32,
        /// The fixed route this booking rides.
        route_code: String,
    },
    /// Hospitality stay details.
    Hospitality {
        /// Guests staying, at least 1.
        guests: u32,
        /// Nights booked, at least 1.
        nights: u32,
        /// The property being booked.
        property_reference: String,
    },
}

impl ServiceDetails {
    /// The service type tag this details bag belongs to.
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

    /// Validate field ranges for this variant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] naming the first field that fails.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Carpool { seats, .. } => in_range(u64::from(*seats), 1, 8, "seats"),
            Self::Scooter {
                estimated_duration_min,
            } => in_range(u64::from(*estimated_duration_min), 1, 480, "estimated_duration_min"),
            Self::Package {
                weight_kg,
                recipient_name,
                ..
            } => {
                positive(*weight_kg, "weight_kg")?;
                non_empty(recipient_name, "recipient_name")
            },
            Self::School {
                students,
                guardian_contact,
                ..
            } => {
                in_range(u64::from(*students), 1, 40, "students")?;
                non_empty(guardian_contact, "guardian_contact")
            },
            Self::Laundry { load_weight_kg, .. } => {
                positive(*load_weight_kg, "load_weight_kg")?;
                if *load_weight_kg > 100.0 {
                    return Err(Error::InvalidRequest {
                        reason: "load_weight_kg exceeds the 100 kg per-pickup limit".into(),
                    });
                }
                Ok(())
            },
            Self::Medical { .. } => Ok(()),
            Self::Pet {
                species, weight_kg, ..
            } => {
                non_empty(species, "species")?;
                positive(*weight_kg, "weight_kg")
            },
            Self::Luxury { passengers, .. } => in_range(u64::from(*passengers), 1, 4, "passengers"),
            Self::Freight {
                cargo_weight_kg,
                pallets,
                ..
            } => {
                positive(*cargo_weight_kg, "cargo_weight_kg")?;
                in_range(u64::from(*pallets), 1, 64, "pallets")
            },
            Self::CarRental {
                days,
                driver_license,
                ..
            } => {
                in_range(u64::from(*days), 1, 90, "days")?;
                non_empty(driver_license, "driver_license")
            },
            Self::Shuttle { seats, route_code } => {
                in_range(u64::from(*seats), 1, 16, "seats")?;
                non_empty(route_code, "route_code")
            },
            Self::Hospitality {
                guests,
                nights,
                property_reference,
            } => {
                in_range(u64::from(*guests), 1, 12, "guests")?;
                in_range(u64::from(*nights), 1, 365, "nights")?;
                non_empty(property_reference, "property_reference")
            },
        }
    }
}

fn positive(value: f64, field: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRequest {
            reason: format!("{field} must be a positive number, got {value}"),
        })
    }
}

fn non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::InvalidRequest {
            reason: format!("{field} must not be empty"),
        })
    } else {
        Ok(())
    }
}

fn in_range(value: u64, min: u64, max: u64, field: &str) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidRequest {
            reason: format!("{field} must be between {min} and {max}, got {value}"),
        })
    }
}
