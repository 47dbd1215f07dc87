//! Tariff and surge configuration.
//!
//! Every constant a pricing formula uses lives here, so deployments can
//! override rates and peak windows without touching formula code, and tests
//! can pin exact figures.

use serde::{Deserialize, Serialize};
use wayfare_core::Money;

/// A peak-demand window over wall-clock hours, half-open: `[start, end)`.
///
/// Hours are interpreted in the frame of the timestamps the deployment's
/// injected clock produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    /// First surged hour (inclusive), 0-23.
    pub start_hour: u32,
    /// First unsurged hour after the window (exclusive), 0-24.
    pub end_hour: u32,
}

impl PeakWindow {
    /// Whether `hour` falls inside this window.
    #[must_use]
    pub const fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

/// Peak windows plus the multiplier applied inside them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurgeSchedule {
    /// The surged hour ranges.
    pub windows: Vec<PeakWindow>,
    /// Multiplier applied to the subtotal inside a window.
    pub multiplier: f64,
}

impl SurgeSchedule {
    /// A schedule that never surges.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            windows: Vec::new(),
            multiplier: 1.0,
        }
    }

    /// The multiplier in effect for `hour`, or `None` outside every window.
    #[must_use]
    pub fn multiplier_for_hour(&self, hour: u32) -> Option<f64> {
        self.windows
            .iter()
            .any(|w| w.contains(hour))
            .then_some(self.multiplier)
    }
}

impl Default for SurgeSchedule {
    /// Morning and evening commute windows at ×1.25.
    fn default() -> Self {
        Self {
            windows: vec![
                PeakWindow {
                    start_hour: 7,
                    end_hour: 9,
                },
                PeakWindow {
                    start_hour: 17,
                    end_hour: 19,
                },
            ],
            multiplier: 1.25,
        }
    }
}

/// Base + per-km rates for trip-shaped services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRates {
    /// Flat base amount.
    pub base: Money,
    /// Charge per kilometer.
    pub per_km: Money,
}

/// Unlock + metered rates for scooter hire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteredRates {
    /// Unlock fee.
    pub unlock: Money,
    /// Charge per minute.
    pub per_min: Money,
    /// Charge per kilometer.
    pub per_km: Money,
}

/// Size-banded base + per-km rates for package delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRates {
    /// Base for a small package.
    pub small_base: Money,
    /// Base for a medium package.
    pub medium_base: Money,
    /// Base for a large package.
    pub large_base: Money,
    /// Charge per kilometer.
    pub per_km: Money,
}

/// Pickup + per-kg rates for laundry, with mode surcharges and the partner
/// commission.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaundryRates {
    /// Pickup base fee.
    pub pickup: Money,
    /// Charge per kilogram of load.
    pub per_kg: Money,
    /// Multiplier over the weight charge for dry cleaning.
    pub dry_clean_multiplier: f64,
    /// Multiplier over the weight charge for same-day express.
    pub express_multiplier: f64,
    /// Partner commission as a fraction of the subtotal (0.15 = 15%).
    pub partner_commission: f64,
}

/// Per-day rates by vehicle class for rentals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRates {
    /// Flat booking fee.
    pub booking_fee: Money,
    /// Per-day rate, economy class.
    pub economy_per_day: Money,
    /// Per-day rate, standard class.
    pub standard_per_day: Money,
    /// Per-day rate, SUV class.
    pub suv_per_day: Money,
    /// Per-day rate, van class.
    pub van_per_day: Money,
}

/// Booking + per-night + per-guest rates for hospitality stays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRates {
    /// Flat booking fee.
    pub booking_fee: Money,
    /// Charge per night.
    pub per_night: Money,
    /// Charge per guest for the whole stay.
    pub per_guest: Money,
}

/// All tariff constants for one deployment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[allow(clippy::struct_field_names)]
pub struct PricingConfig {
    /// Peak windows for surge-eligible services.
    pub surge: SurgeSchedule,
    /// Carpool rates (total splits per seat).
    pub carpool: TripRates,
    /// Shuttle rates (total splits per seat).
    pub shuttle: TripRates,
    /// School route rates (total splits per student).
    pub school: TripRates,
    /// Medical transport rates.
    pub medical: TripRates,
    /// Fee added when medical assistance rides along.
    pub medical_assistance_fee: Money,
    /// Pet transport rates.
    pub pet: TripRates,
    /// Fee added for crate handling.
    pub pet_crate_fee: Money,
    /// Luxury ride rates (premium tier).
    pub luxury: TripRates,
    /// Elite-tier premium as a fraction of the subtotal (0.6 = +60%).
    pub luxury_elite_premium: f64,
    /// Freight rates.
    pub freight: TripRates,
    /// Freight charge per cargo kilogram.
    pub freight_per_cargo_kg: Money,
    /// Scooter metered rates.
    pub scooter: MeteredRates,
    /// Package delivery rates.
    pub package: PackageRates,
    /// Laundry rates.
    pub laundry: LaundryRates,
    /// Car rental rates.
    pub car_rental: RentalRates,
    /// Hospitality stay rates.
    pub hospitality: StayRates,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            surge: SurgeSchedule::default(),
            carpool: TripRates {
                base: Money::from_cents(1_000),
                per_km: Money::from_cents(200),
            },
            shuttle: TripRates {
                base: Money::from_cents(400),
                per_km: Money::from_cents(75),
            },
            school: TripRates {
                base: Money::from_cents(1_500),
                per_km: Money::from_cents(120),
            },
            medical: TripRates {
                base: Money::from_cents(1_800),
                per_km: Money::from_cents(250),
            },
            medical_assistance_fee: Money::from_cents(1_200),
            pet: TripRates {
                base: Money::from_cents(800),
                per_km: Money::from_cents(180),
            },
            pet_crate_fee: Money::from_cents(500),
            luxury: TripRates {
                base: Money::from_cents(2_500),
                per_km: Money::from_cents(350),
            },
            luxury_elite_premium: 0.6,
            freight: TripRates {
                base: Money::from_cents(4_000),
                per_km: Money::from_cents(110),
            },
            freight_per_cargo_kg: Money::from_cents(5),
            scooter: MeteredRates {
                unlock: Money::from_cents(100),
                per_min: Money::from_cents(35),
                per_km: Money::from_cents(15),
            },
            package: PackageRates {
                small_base: Money::from_cents(500),
                medium_base: Money::from_cents(800),
                large_base: Money::from_cents(1_200),
                per_km: Money::from_cents(100),
            },
            laundry: LaundryRates {
                pickup: Money::from_cents(600),
                per_kg: Money::from_cents(150),
                dry_clean_multiplier: 1.8,
                express_multiplier: 1.5,
                partner_commission: 0.15,
            },
            car_rental: RentalRates {
                booking_fee: Money::from_cents(1_000),
                economy_per_day: Money::from_cents(3_500),
                standard_per_day: Money::from_cents(5_000),
                suv_per_day: Money::from_cents(7_500),
                van_per_day: Money::from_cents(9_000),
            },
            hospitality: StayRates {
                booking_fee: Money::from_cents(2_000),
                per_night: Money::from_cents(8_000),
                per_guest: Money::from_cents(1_500),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_windows_are_half_open() {
        let schedule = SurgeSchedule::default();
        assert_eq!(schedule.multiplier_for_hour(6), None);
        assert_eq!(schedule.multiplier_for_hour(7), Some(1.25));
        assert_eq!(schedule.multiplier_for_hour(8), Some(1.25));
        assert_eq!(schedule.multiplier_for_hour(9), None);
        assert_eq!(schedule.multiplier_for_hour(17), Some(1.25));
        assert_eq!(schedule.multiplier_for_hour(19), None);
    }

    #[test]
    fn empty_schedule_never_surges() {
        let schedule = SurgeSchedule::none();
        for hour in 0..24 {
            assert_eq!(schedule.multiplier_for_hour(hour), None);
        }
    }
}
