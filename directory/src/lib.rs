//! # Wayfare Directory
//!
//! The read-only provider directory: given a service type and a filter,
//! return candidate providers. Queries dispatch through a registry of
//! per-service-type [`DirectoryAdapter`]s, so a new provider source means
//! registering one adapter, not editing dispatch code.
//!
//! The directory never mutates anything: an empty candidate list is a
//! successful answer, and infrastructure failure surfaces as the typed
//! `DirectoryUnavailable` error.

pub mod geo;

pub use geo::haversine_km;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use wayfare_core::{Error, Provider, ProviderFilter, Result, ServiceType};

/// A searchable provider source for one service type.
///
/// Adapters are read-only. An adapter that cannot express a given attribute
/// filter against its backing store ignores that attribute (each adapter
/// documents which filters it honors natively).
#[async_trait]
pub trait DirectoryAdapter: Send + Sync {
    /// The service type this adapter serves.
    fn service_type(&self) -> ServiceType;

    /// Return candidate providers matching `filter`. An empty list is
    /// success.
    ///
    /// # Errors
    ///
    /// `DirectoryUnavailable` when the backing store cannot be reached.
    async fn search(&self, filter: &ProviderFilter) -> Result<Vec<Provider>>;
}

/// Registry of directory adapters keyed by service type.
#[derive(Clone, Default)]
pub struct ProviderDirectory {
    adapters: HashMap<ServiceType, Arc<dyn DirectoryAdapter>>,
}

impl ProviderDirectory {
    /// An empty directory with no adapters registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter` under its declared service type, replacing any
    /// existing adapter for that type.
    pub fn register(&mut self, adapter: Arc<dyn DirectoryAdapter>) {
        self.adapters.insert(adapter.service_type(), adapter);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, adapter: Arc<dyn DirectoryAdapter>) -> Self {
        self.register(adapter);
        self
    }

    /// Search for candidate providers of `service_type` matching `filter`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedServiceType` when no adapter is registered for the type
    /// - `DirectoryUnavailable` when the adapter's backing store is
    ///   unreachable
    pub async fn discover(
        &self,
        service_type: ServiceType,
        filter: &ProviderFilter,
    ) -> Result<Vec<Provider>> {
        let adapter = self
            .adapters
            .get(&service_type)
            .ok_or(Error::UnsupportedServiceType { service_type })?;
        let candidates = adapter.search(filter).await?;
        tracing::debug!(
            service_type = %service_type,
            candidates = candidates.len(),
            "directory search"
        );
        Ok(candidates)
    }
}

/// Whether `provider` satisfies `filter`.
///
/// The shared predicate behind adapters that filter in process: radius
/// check via [`haversine_km`], rating floor, availability, and exact-match
/// attributes. A filter with a `location` but no `radius_km` (or the other
/// way round) applies no geographic bound.
#[must_use]
pub fn matches_filter(provider: &Provider, filter: &ProviderFilter) -> bool {
    if filter.available_only && !provider.available {
        return false;
    }
    if let Some(min_rating) = filter.min_rating {
        if provider.rating < min_rating {
            return false;
        }
    }
    if let (Some(center), Some(radius_km)) = (&filter.location, filter.radius_km) {
        if haversine_km(&provider.location, center) > radius_km {
            return false;
        }
    }
    filter
        .attributes
        .iter()
        .all(|(key, value)| provider.attributes.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use std::collections::BTreeMap;
    use wayfare_core::{GeoPoint, ProviderId};

    fn driver(id: &str, lat: f64, lon: f64, rating: f64, available: bool) -> Provider {
        Provider {
            id: ProviderId::new(id),
            service_type: ServiceType::Carpool,
            location: GeoPoint::new(lat, lon),
            rating,
            capacity: 4,
            available,
            attributes: BTreeMap::new(),
        }
    }

    struct FixedAdapter(Vec<Provider>);

    #[async_trait]
    impl DirectoryAdapter for FixedAdapter {
        fn service_type(&self) -> ServiceType {
            ServiceType::Carpool
        }

        async fn search(&self, filter: &ProviderFilter) -> Result<Vec<Provider>> {
            Ok(self
                .0
                .iter()
                .filter(|p| matches_filter(p, filter))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn unregistered_type_is_unsupported() {
        let directory = ProviderDirectory::new();
        let err = directory
            .discover(ServiceType::Laundry, &ProviderFilter::any_available())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedServiceType { .. }));
    }

    #[tokio::test]
    async fn empty_result_is_success() {
        let directory =
            ProviderDirectory::new().with(Arc::new(FixedAdapter(vec![])));
        let found = directory
            .discover(ServiceType::Carpool, &ProviderFilter::any_available())
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn radius_and_rating_filters_apply() {
        let directory = ProviderDirectory::new().with(Arc::new(FixedAdapter(vec![
            driver("near-good", 25.21, 55.28, 4.8, true),
            driver("near-poor", 25.21, 55.26, 3.1, true),
            driver("far-good", 24.47, 54.37, 4.9, true),
            driver("near-busy", 25.20, 55.27, 4.9, false),
        ])));

        let filter = ProviderFilter::near(GeoPoint::new(25.20, 55.27), 10.0).with_min_rating(4.5);
        let found = directory
            .discover(ServiceType::Carpool, &filter)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProviderId::new("near-good"));
    }

    #[test]
    fn attribute_filters_are_exact_match() {
        let mut provider = driver("suv-1", 25.20, 55.27, 4.5, true);
        provider
            .attributes
            .insert("vehicle".into(), "suv".into());

        let matching = ProviderFilter::any_available().with_attribute("vehicle", "suv");
        let mismatched = ProviderFilter::any_available().with_attribute("vehicle", "sedan");

        assert!(matches_filter(&provider, &matching));
        assert!(!matches_filter(&provider, &mismatched));
    }
}
