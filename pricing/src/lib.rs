//! # Wayfare Pricing
//!
//! Pure, deterministic pricing for the Wayfare orchestrator: a registry of
//! per-service-type tariff adapters mapping `(service type, parameters)` to
//! an itemized [`PriceBreakdown`](wayfare_core::PriceBreakdown).
//!
//! No I/O and no global clock reads happen here. The quote timestamp is an
//! explicit argument (it drives peak-window surge only), so identical
//! inputs always produce bit-identical results and tests can pin any hour
//! of day.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use wayfare_pricing::{PricingEngine, QuoteParams};
//! use wayfare_core::ServiceType;
//!
//! let engine = PricingEngine::with_defaults();
//! let at = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).single().unwrap();
//! let breakdown = engine
//!     .quote(
//!         ServiceType::Carpool,
//!         &QuoteParams::Carpool { distance_km: 140.0, seats: 2 },
//!         at,
//!     )
//!     .unwrap();
//! assert_eq!(breakdown.total.cents(), 29_000);
//! ```

pub mod config;
pub mod error;
pub mod params;
pub mod tariff;

pub use config::{PeakWindow, PricingConfig, SurgeSchedule};
pub use params::QuoteParams;
pub use tariff::{PricingAdapter, TripExtras};

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tariff::{LaundryTariff, MeteredTariff, ParcelTariff, TermRates, TermTariff, TripTariff};
use wayfare_core::{Error, PriceBreakdown, Result, ServiceType};

/// The pricing engine: a lookup table of tariff adapters keyed by service
/// type.
///
/// Construction wires one adapter per service type from a
/// [`PricingConfig`]; deployments with bespoke tariffs register their own
/// adapters over the defaults.
#[derive(Clone)]
pub struct PricingEngine {
    adapters: HashMap<ServiceType, Arc<dyn PricingAdapter>>,
}

impl PricingEngine {
    /// Build an engine with one tariff adapter per service type from
    /// `config`.
    #[must_use]
    pub fn new(config: PricingConfig) -> Self {
        let surge = config.surge.clone();
        let mut engine = Self {
            adapters: HashMap::new(),
        };
        let trip = |ty: ServiceType, rates, extras| {
            Arc::new(TripTariff::new(ty, rates, extras, surge.clone()))
        };

        engine.register(
            ServiceType::Carpool,
            trip(ServiceType::Carpool, config.carpool, TripExtras::default()),
        );
        engine.register(
            ServiceType::Shuttle,
            trip(ServiceType::Shuttle, config.shuttle, TripExtras::default()),
        );
        engine.register(
            ServiceType::School,
            trip(ServiceType::School, config.school, TripExtras::default()),
        );
        engine.register(
            ServiceType::Medical,
            trip(
                ServiceType::Medical,
                config.medical,
                TripExtras {
                    assistance_fee: config.medical_assistance_fee,
                    ..TripExtras::default()
                },
            ),
        );
        engine.register(
            ServiceType::Pet,
            trip(
                ServiceType::Pet,
                config.pet,
                TripExtras {
                    crate_fee: config.pet_crate_fee,
                    ..TripExtras::default()
                },
            ),
        );
        engine.register(
            ServiceType::Luxury,
            trip(
                ServiceType::Luxury,
                config.luxury,
                TripExtras {
                    elite_premium: config.luxury_elite_premium,
                    ..TripExtras::default()
                },
            ),
        );
        engine.register(
            ServiceType::Freight,
            trip(
                ServiceType::Freight,
                config.freight,
                TripExtras {
                    per_cargo_kg: config.freight_per_cargo_kg,
                    ..TripExtras::default()
                },
            ),
        );
        engine.register(
            ServiceType::Scooter,
            Arc::new(MeteredTariff::new(config.scooter, surge.clone())),
        );
        engine.register(
            ServiceType::Package,
            Arc::new(ParcelTariff::new(config.package, surge.clone())),
        );
        engine.register(
            ServiceType::Laundry,
            Arc::new(LaundryTariff::new(config.laundry)),
        );
        engine.register(
            ServiceType::CarRental,
            Arc::new(TermTariff::new(TermRates::Rental(config.car_rental))),
        );
        engine.register(
            ServiceType::Hospitality,
            Arc::new(TermTariff::new(TermRates::Stay(config.hospitality))),
        );
        engine
    }

    /// An engine with the documented default tariffs.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PricingConfig::default())
    }

    /// Replace or add the adapter for one service type.
    pub fn register(&mut self, service_type: ServiceType, adapter: Arc<dyn PricingAdapter>) {
        self.adapters.insert(service_type, adapter);
    }

    /// Price `params` for `service_type` as of `at`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedServiceType` when no adapter is registered for the type
    /// - `InvalidParameters` when the params variant mismatches the type or
    ///   a field is out of range
    pub fn quote(
        &self,
        service_type: ServiceType,
        params: &QuoteParams,
        at: DateTime<Utc>,
    ) -> Result<PriceBreakdown> {
        let adapter = self
            .adapters
            .get(&service_type)
            .ok_or(Error::UnsupportedServiceType { service_type })?;
        adapter.quote(params, at)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn every_service_type_has_a_default_adapter() {
        let engine = PricingEngine::with_defaults();
        for ty in ServiceType::ALL {
            assert!(engine.adapters.contains_key(&ty), "missing adapter for {ty}");
        }
    }

    #[test]
    fn unregistered_type_is_unsupported() {
        let engine = PricingEngine {
            adapters: HashMap::new(),
        };
        let err = engine
            .quote(
                ServiceType::Carpool,
                &QuoteParams::Carpool {
                    distance_km: 5.0,
                    seats: 1,
                },
                noon(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedServiceType { .. }));
    }

    #[test]
    fn engine_routes_params_to_matching_adapter() {
        let engine = PricingEngine::with_defaults();
        let err = engine
            .quote(
                ServiceType::Carpool,
                &QuoteParams::Scooter {
                    distance_km: 2.0,
                    duration_min: 10.0,
                },
                noon(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));
    }
}
