//! # Wayfare Core
//!
//! Domain types and abstractions for the Wayfare multi-service request
//! orchestrator.
//!
//! Wayfare advances heterogeneous service requests (carpool, package
//! delivery, laundry pickup, school transport, ...) through a fixed
//! lifecycle:
//!
//! ```text
//! pending → assigned → confirmed → active → completed
//!     \________\___________/
//!                  ↓
//!              cancelled
//! ```
//!
//! This crate holds everything the orchestrating crates share:
//!
//! - **Domain types**: [`ServiceRequest`], [`ServiceType`], [`RequestState`],
//!   the tagged [`ServiceDetails`] attribute bag, [`Money`] and
//!   [`PriceBreakdown`], the [`Provider`] read model
//! - **Error taxonomy**: the single [`Error`] enum every component propagates
//!   unchanged (see [`error`])
//! - **Seams**: the [`RequestStore`] persistence trait with its conditional
//!   write, and the injected [`Clock`]
//!
//! ## Architecture principles
//!
//! - Dependency injection at construction (store, clock, adapters); no
//!   module-level singletons
//! - The lifecycle controller is the sole writer of [`ServiceRequest`];
//!   pricing and the directory are read-only collaborators
//! - Every transition is a conditional write against the durable store, so
//!   multiple controller instances need no inter-instance coordination

pub mod details;
pub mod environment;
pub mod error;
pub mod ids;
pub mod price;
pub mod provider;
pub mod request;
pub mod service;
pub mod store;

pub use details::ServiceDetails;
pub use environment::{Clock, SystemClock};
pub use error::{Error, Result};
pub use ids::{ProviderId, RequestId, RequesterId};
pub use price::{Money, PriceBreakdown, PriceLine, Settlement};
pub use provider::{Provider, ProviderFilter};
pub use request::{GeoPoint, RequestState, Schedule, ServiceRequest};
pub use service::ServiceType;
pub use store::{RequestStore, UpdateOutcome};

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
