//! Tariff adapters: the formula families behind the per-type registry.
//!
//! Five families cover the twelve service types. Each instance is bound to
//! one service type at construction; the engine routes a quote to the
//! instance registered for the request's type, so adding a service type
//! means registering one more adapter, not editing a dispatch switch.
//!
//! All formulas are affine: a base amount plus itemized additive lines,
//! scaled by the surge multiplier when the quote timestamp falls inside a
//! peak window. Multiplicative notions (luxury tier, laundry mode, partner
//! commission) are rendered as explicit additive lines so the breakdown
//! stays auditable.

use crate::config::{LaundryRates, MeteredRates, PackageRates, RentalRates, StayRates, SurgeSchedule, TripRates};
use crate::error::{invalid_parameters, no_overflow};
use crate::params::QuoteParams;
use chrono::{DateTime, Timelike, Utc};
use wayfare_core::details::{LaundryMode, LuxuryTier, PackageSize, VehicleClass};
use wayfare_core::{Money, PriceBreakdown, PriceLine, Result, ServiceType};

/// A pure, deterministic price calculator for one service type.
///
/// No side effects and no I/O: identical inputs produce bit-identical
/// breakdowns, any number of times.
pub trait PricingAdapter: Send + Sync {
    /// Compute a quote for `params` as of `at`.
    ///
    /// `at` only feeds peak-window surge determination; it comes from the
    /// caller's injected clock, never from a global.
    ///
    /// # Errors
    ///
    /// `InvalidParameters` when a field is out of range or the params
    /// variant does not match this adapter's service type.
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown>;
}

/// Assemble a breakdown from a base and additive lines, applying surge.
fn build_breakdown(
    service_type: ServiceType,
    base: Money,
    lines: Vec<PriceLine>,
    split: Option<u32>,
    surge: &SurgeSchedule,
    at: DateTime<Utc>,
) -> Result<PriceBreakdown> {
    let mut subtotal = base;
    for line in &lines {
        subtotal = no_overflow(subtotal.checked_add(line.amount), "total")?;
    }
    let surge_multiplier = surge.multiplier_for_hour(at.hour());
    let total = match surge_multiplier {
        Some(multiplier) => no_overflow(subtotal.checked_scale(multiplier), "total")?,
        None => subtotal,
    };
    let per_seat = match split {
        Some(parts) => Some(no_overflow(total.split_evenly(parts), "per_seat")?),
        None => None,
    };
    Ok(PriceBreakdown {
        service_type,
        base,
        lines,
        surge_multiplier,
        total,
        per_seat,
    })
}

fn wrong_params(expected: ServiceType) -> wayfare_core::Error {
    invalid_parameters("params", format!("expected {expected} parameters"))
}

// ============================================================================
// Trip family
// ============================================================================

/// Per-type add-ons for trip-shaped tariffs. Zero amounts produce no line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TripExtras {
    /// Fee added when medical assistance rides along.
    pub assistance_fee: Money,
    /// Fee added for crate handling.
    pub crate_fee: Money,
    /// Elite-tier premium as a fraction of the subtotal.
    pub elite_premium: f64,
    /// Charge per cargo kilogram (freight).
    pub per_cargo_kg: Money,
}

/// Base + per-km tariff for trip-shaped services: carpool, shuttle, school,
/// medical, pet, luxury, freight. Seat-carrying variants split the total
/// evenly per seat/student.
#[derive(Clone, Debug)]
pub struct TripTariff {
    service_type: ServiceType,
    rates: TripRates,
    extras: TripExtras,
    surge: SurgeSchedule,
}

impl TripTariff {
    /// Bind a trip tariff to one service type.
    #[must_use]
    pub const fn new(
        service_type: ServiceType,
        rates: TripRates,
        extras: TripExtras,
        surge: SurgeSchedule,
    ) -> Self {
        Self {
            service_type,
            rates,
            extras,
            surge,
        }
    }
}

impl PricingAdapter for TripTariff {
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown> {
        if params.service_type() != self.service_type {
            return Err(wrong_params(self.service_type));
        }
        params.validate()?;

        let (distance_km, split) = match *params {
            QuoteParams::Carpool { distance_km, seats }
            | QuoteParams::Shuttle { distance_km, seats } => (distance_km, Some(seats)),
            QuoteParams::School {
                distance_km,
                students,
            } => (distance_km, Some(students)),
            QuoteParams::Medical { distance_km, .. }
            | QuoteParams::Pet { distance_km, .. }
            | QuoteParams::Luxury { distance_km, .. }
            | QuoteParams::Freight { distance_km, .. } => (distance_km, None),
            _ => return Err(wrong_params(self.service_type)),
        };

        let distance_charge = no_overflow(
            self.rates.per_km.checked_scale(distance_km),
            "distance_km",
        )?;
        let mut lines = vec![PriceLine::new("distance", distance_charge)];

        match *params {
            QuoteParams::Medical { assistance: true, .. } if !self.extras.assistance_fee.is_zero() => {
                lines.push(PriceLine::new("assistance", self.extras.assistance_fee));
            },
            QuoteParams::Pet { crated: true, .. } if !self.extras.crate_fee.is_zero() => {
                lines.push(PriceLine::new("crate handling", self.extras.crate_fee));
            },
            QuoteParams::Luxury {
                tier: LuxuryTier::Elite,
                ..
            } if self.extras.elite_premium > 0.0 => {
                let subtotal = no_overflow(self.rates.base.checked_add(distance_charge), "total")?;
                let premium = no_overflow(
                    subtotal.checked_scale(self.extras.elite_premium),
                    "total",
                )?;
                lines.push(PriceLine::new("elite tier", premium));
            },
            QuoteParams::Freight {
                cargo_weight_kg, ..
            } if !self.extras.per_cargo_kg.is_zero() => {
                let cargo = no_overflow(
                    self.extras.per_cargo_kg.checked_scale(cargo_weight_kg),
                    "cargo_weight_kg",
                )?;
                lines.push(PriceLine::new("cargo weight", cargo));
            },
            _ => {},
        }

        build_breakdown(self.service_type, self.rates.base, lines, split, &self.surge, at)
    }
}

// ============================================================================
// Metered family (scooter)
// ============================================================================

/// Unlock fee + per-minute + per-km metering.
#[derive(Clone, Debug)]
pub struct MeteredTariff {
    rates: MeteredRates,
    surge: SurgeSchedule,
}

impl MeteredTariff {
    /// Build a metered tariff.
    #[must_use]
    pub const fn new(rates: MeteredRates, surge: SurgeSchedule) -> Self {
        Self { rates, surge }
    }
}

impl PricingAdapter for MeteredTariff {
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown> {
        let QuoteParams::Scooter {
            distance_km,
            duration_min,
        } = *params
        else {
            return Err(wrong_params(ServiceType::Scooter));
        };
        params.validate()?;

        let time_charge = no_overflow(
            self.rates.per_min.checked_scale(duration_min),
            "duration_min",
        )?;
        let distance_charge =
            no_overflow(self.rates.per_km.checked_scale(distance_km), "distance_km")?;
        let lines = vec![
            PriceLine::new("time", time_charge),
            PriceLine::new("distance", distance_charge),
        ];
        build_breakdown(ServiceType::Scooter, self.rates.unlock, lines, None, &self.surge, at)
    }
}

// ============================================================================
// Parcel family (package)
// ============================================================================

/// Size-banded base + per-km delivery tariff.
#[derive(Clone, Debug)]
pub struct ParcelTariff {
    rates: PackageRates,
    surge: SurgeSchedule,
}

impl ParcelTariff {
    /// Build a parcel tariff.
    #[must_use]
    pub const fn new(rates: PackageRates, surge: SurgeSchedule) -> Self {
        Self { rates, surge }
    }
}

impl PricingAdapter for ParcelTariff {
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown> {
        let QuoteParams::Package { distance_km, size } = *params else {
            return Err(wrong_params(ServiceType::Package));
        };
        params.validate()?;

        let base = match size {
            PackageSize::Small => self.rates.small_base,
            PackageSize::Medium => self.rates.medium_base,
            PackageSize::Large => self.rates.large_base,
        };
        let distance_charge =
            no_overflow(self.rates.per_km.checked_scale(distance_km), "distance_km")?;
        let lines = vec![PriceLine::new("distance", distance_charge)];
        build_breakdown(ServiceType::Package, base, lines, None, &self.surge, at)
    }
}

// ============================================================================
// Laundry family
// ============================================================================

/// Pickup + per-kg tariff with mode surcharges and partner commission.
/// Laundry never surges: the load is processed off-peak regardless of when
/// it is booked.
#[derive(Clone, Debug)]
pub struct LaundryTariff {
    rates: LaundryRates,
}

impl LaundryTariff {
    /// Build a laundry tariff.
    #[must_use]
    pub const fn new(rates: LaundryRates) -> Self {
        Self { rates }
    }
}

impl PricingAdapter for LaundryTariff {
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown> {
        let QuoteParams::Laundry {
            load_weight_kg,
            mode,
            ..
        } = params
        else {
            return Err(wrong_params(ServiceType::Laundry));
        };
        params.validate()?;

        let weight_charge = no_overflow(
            self.rates.per_kg.checked_scale(*load_weight_kg),
            "load_weight_kg",
        )?;
        let mut lines = vec![PriceLine::new("weight", weight_charge)];

        let mode_multiplier = match mode {
            LaundryMode::WashFold => 1.0,
            LaundryMode::DryClean => self.rates.dry_clean_multiplier,
            LaundryMode::Express => self.rates.express_multiplier,
        };
        if mode_multiplier > 1.0 {
            let surcharge = no_overflow(
                weight_charge.checked_scale(mode_multiplier - 1.0),
                "load_weight_kg",
            )?;
            let label = match mode {
                LaundryMode::DryClean => "dry cleaning",
                LaundryMode::Express => "express service",
                LaundryMode::WashFold => "mode surcharge",
            };
            lines.push(PriceLine::new(label, surcharge));
        }

        let mut subtotal = self.rates.pickup;
        for line in &lines {
            subtotal = no_overflow(subtotal.checked_add(line.amount), "total")?;
        }
        let commission = no_overflow(
            subtotal.checked_scale(self.rates.partner_commission),
            "total",
        )?;
        lines.push(PriceLine::new("partner commission", commission));

        build_breakdown(
            ServiceType::Laundry,
            self.rates.pickup,
            lines,
            None,
            &SurgeSchedule::none(),
            at,
        )
    }
}

// ============================================================================
// Term family (car rental, hospitality)
// ============================================================================

/// Rates for a term-billed service.
#[derive(Clone, Copy, Debug)]
pub enum TermRates {
    /// Per-day vehicle rental.
    Rental(RentalRates),
    /// Per-night hospitality stay.
    Stay(StayRates),
}

/// Per-day / per-night tariff for term-billed services. Term billing is
/// surge-exempt.
#[derive(Clone, Debug)]
pub struct TermTariff {
    rates: TermRates,
}

impl TermTariff {
    /// Build a term tariff.
    #[must_use]
    pub const fn new(rates: TermRates) -> Self {
        Self { rates }
    }

    const fn service_type(&self) -> ServiceType {
        match self.rates {
            TermRates::Rental(_) => ServiceType::CarRental,
            TermRates::Stay(_) => ServiceType::Hospitality,
        }
    }
}

impl PricingAdapter for TermTariff {
    fn quote(&self, params: &QuoteParams, at: DateTime<Utc>) -> Result<PriceBreakdown> {
        params.validate()?;
        match (self.rates, params) {
            (
                TermRates::Rental(rates),
                &QuoteParams::CarRental {
                    days,
                    vehicle_class,
                },
            ) => {
                let per_day = match vehicle_class {
                    VehicleClass::Economy => rates.economy_per_day,
                    VehicleClass::Standard => rates.standard_per_day,
                    VehicleClass::Suv => rates.suv_per_day,
                    VehicleClass::Van => rates.van_per_day,
                };
                let term_charge = no_overflow(per_day.checked_mul(days), "days")?;
                let lines = vec![PriceLine::new("rental term", term_charge)];
                build_breakdown(
                    ServiceType::CarRental,
                    rates.booking_fee,
                    lines,
                    None,
                    &SurgeSchedule::none(),
                    at,
                )
            },
            (TermRates::Stay(rates), &QuoteParams::Hospitality { guests, nights }) => {
                let night_charge = no_overflow(rates.per_night.checked_mul(nights), "nights")?;
                let guest_charge = no_overflow(rates.per_guest.checked_mul(guests), "guests")?;
                let lines = vec![
                    PriceLine::new("nights", night_charge),
                    PriceLine::new("guests", guest_charge),
                ];
                build_breakdown(
                    ServiceType::Hospitality,
                    rates.booking_fee,
                    lines,
                    None,
                    &SurgeSchedule::none(),
                    at,
                )
            },
            _ => Err(wrong_params(self.service_type())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use crate::config::PricingConfig;
    use chrono::TimeZone;
    use wayfare_core::ProviderId;

    fn off_peak() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).single().unwrap()
    }

    fn peak() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, 7, 30, 0).single().unwrap()
    }

    fn carpool_tariff() -> TripTariff {
        let cfg = PricingConfig::default();
        TripTariff::new(
            ServiceType::Carpool,
            cfg.carpool,
            TripExtras::default(),
            cfg.surge,
        )
    }

    #[test]
    fn carpool_quote_matches_documented_rates() {
        // base $10 + 140 km x $2/km = $290, split across 2 seats.
        let breakdown = carpool_tariff()
            .quote(
                &QuoteParams::Carpool {
                    distance_km: 140.0,
                    seats: 2,
                },
                off_peak(),
            )
            .unwrap();

        assert_eq!(breakdown.total, Money::from_cents(29_000));
        assert_eq!(breakdown.per_seat, Some(Money::from_cents(14_500)));
        assert_eq!(breakdown.surge_multiplier, None);
    }

    #[test]
    fn carpool_quote_surges_in_peak_window() {
        let breakdown = carpool_tariff()
            .quote(
                &QuoteParams::Carpool {
                    distance_km: 140.0,
                    seats: 2,
                },
                peak(),
            )
            .unwrap();

        // $290 x 1.25 = $362.50
        assert_eq!(breakdown.surge_multiplier, Some(1.25));
        assert_eq!(breakdown.total, Money::from_cents(36_250));
    }

    #[test]
    fn quotes_are_deterministic() {
        let params = QuoteParams::Carpool {
            distance_km: 140.0,
            seats: 2,
        };
        let tariff = carpool_tariff();
        let first = tariff.quote(&params, off_peak()).unwrap();
        let second = tariff.quote(&params, off_peak()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total.cents(), second.total.cents());
    }

    #[test]
    fn mismatched_params_are_invalid() {
        let err = carpool_tariff()
            .quote(
                &QuoteParams::Scooter {
                    distance_km: 2.0,
                    duration_min: 10.0,
                },
                off_peak(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            wayfare_core::Error::InvalidParameters { field: "params", .. }
        ));
    }

    #[test]
    fn laundry_commission_is_a_fraction_of_subtotal() {
        let cfg = PricingConfig::default();
        let breakdown = LaundryTariff::new(cfg.laundry)
            .quote(
                &QuoteParams::Laundry {
                    load_weight_kg: 10.0,
                    mode: LaundryMode::WashFold,
                    partner_id: ProviderId::new("laundro-9"),
                },
                off_peak(),
            )
            .unwrap();

        // pickup $6 + 10 kg x $1.50 = $21 subtotal; commission 15% = $3.15
        let commission = breakdown
            .lines
            .iter()
            .find(|l| l.label == "partner commission")
            .unwrap();
        assert_eq!(commission.amount, Money::from_cents(315));
        assert_eq!(breakdown.total, Money::from_cents(2_415));
    }

    #[test]
    fn laundry_never_surges() {
        let cfg = PricingConfig::default();
        let breakdown = LaundryTariff::new(cfg.laundry)
            .quote(
                &QuoteParams::Laundry {
                    load_weight_kg: 10.0,
                    mode: LaundryMode::WashFold,
                    partner_id: ProviderId::new("laundro-9"),
                },
                peak(),
            )
            .unwrap();
        assert_eq!(breakdown.surge_multiplier, None);
    }

    #[test]
    fn elite_tier_adds_premium_line() {
        let cfg = PricingConfig::default();
        let tariff = TripTariff::new(
            ServiceType::Luxury,
            cfg.luxury,
            TripExtras {
                elite_premium: cfg.luxury_elite_premium,
                ..TripExtras::default()
            },
            SurgeSchedule::none(),
        );
        let breakdown = tariff
            .quote(
                &QuoteParams::Luxury {
                    distance_km: 10.0,
                    tier: LuxuryTier::Elite,
                },
                off_peak(),
            )
            .unwrap();

        // base $25 + 10 km x $3.50 = $60; elite premium 60% = $36; total $96
        assert_eq!(breakdown.total, Money::from_cents(9_600));
        assert!(breakdown.lines.iter().any(|l| l.label == "elite tier"));
    }

    #[test]
    fn rental_term_is_per_day_by_class() {
        let cfg = PricingConfig::default();
        let breakdown = TermTariff::new(TermRates::Rental(cfg.car_rental))
            .quote(
                &QuoteParams::CarRental {
                    days: 3,
                    vehicle_class: VehicleClass::Suv,
                },
                off_peak(),
            )
            .unwrap();

        // booking $10 + 3 days x $75 = $235
        assert_eq!(breakdown.total, Money::from_cents(23_500));
    }

    #[test]
    fn scooter_meters_time_and_distance() {
        let cfg = PricingConfig::default();
        let breakdown = MeteredTariff::new(cfg.scooter, SurgeSchedule::none())
            .quote(
                &QuoteParams::Scooter {
                    distance_km: 4.0,
                    duration_min: 20.0,
                },
                off_peak(),
            )
            .unwrap();

        // unlock $1 + 20 min x $0.35 + 4 km x $0.15 = $8.60
        assert_eq!(breakdown.total, Money::from_cents(860));
    }
}
