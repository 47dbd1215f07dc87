//! The lifecycle controller.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use wayfare_core::{
    Clock, Error, GeoPoint, PriceBreakdown, Provider, ProviderFilter, ProviderId, RequestId,
    RequestState, RequestStore, RequesterId, Result, Schedule, ServiceDetails, ServiceRequest,
    ServiceType, Settlement, UpdateOutcome,
};
use wayfare_directory::ProviderDirectory;
use wayfare_pricing::{PricingEngine, QuoteParams};

/// How many times `price` re-attempts its conditional write after losing to
/// a concurrent (but compatible) state transition.
const PRICE_ATTEMPTS: usize = 3;

/// Creation input for a new service request.
#[derive(Clone, Debug)]
pub struct NewRequest {
    /// The declared service category; must match the details tag.
    pub service_type: ServiceType,
    /// The initiating party.
    pub requester_id: RequesterId,
    /// Trip origin, for trip-like services.
    pub origin: Option<GeoPoint>,
    /// Trip destination, when known up front.
    pub destination: Option<GeoPoint>,
    /// Requested date/time; as-soon-as-possible when empty.
    pub schedule: Schedule,
    /// Service-type-specific attributes.
    pub details: ServiceDetails,
}

/// The request lifecycle controller.
///
/// All collaborators are injected at construction: the durable store, the
/// clock, the pricing engine, and the provider directory. The controller
/// holds no per-request state of its own, so any number of instances can
/// run against the same store.
pub struct LifecycleController {
    store: Arc<dyn RequestStore>,
    clock: Arc<dyn Clock>,
    pricing: PricingEngine,
    directory: ProviderDirectory,
}

impl LifecycleController {
    /// Build a controller over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn RequestStore>,
        clock: Arc<dyn Clock>,
        pricing: PricingEngine,
        directory: ProviderDirectory,
    ) -> Self {
        Self {
            store,
            clock,
            pricing,
            directory,
        }
    }

    /// Create a request in `pending`.
    ///
    /// Validation is centralized here: the details tag must match the
    /// declared service type, and the variant's field ranges must hold.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` on a tag mismatch or failed field validation
    /// - `StoreUnavailable` when the insert cannot reach the store
    pub async fn create(&self, new: NewRequest) -> Result<ServiceRequest> {
        if new.details.service_type() != new.service_type {
            return Err(Error::InvalidRequest {
                reason: format!(
                    "details are for {}, request declares {}",
                    new.details.service_type(),
                    new.service_type
                ),
            });
        }
        new.details.validate()?;

        let request = ServiceRequest {
            id: RequestId::new(),
            service_type: new.service_type,
            requester_id: new.requester_id,
            origin: new.origin,
            destination: new.destination,
            schedule: new.schedule,
            details: new.details,
            state: RequestState::Pending,
            provider_id: None,
            price_breakdown: None,
            settlement: None,
            cancellation_reason: None,
            created_at: self.clock.now(),
            assigned_at: None,
            confirmed_at: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
        };
        self.store.insert(&request).await?;
        tracing::info!(
            request_id = %request.id,
            service_type = %request.service_type,
            "request created"
        );
        Ok(request)
    }

    /// Point lookup.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` when no request exists under `id`
    /// - `StoreUnavailable` when the store cannot be reached
    pub async fn fetch(&self, id: RequestId) -> Result<ServiceRequest> {
        self.store
            .fetch(id)
            .await?
            .ok_or(Error::RequestNotFound(id))
    }

    /// Search for candidate providers. Read-only; delegates to the
    /// directory registry.
    ///
    /// # Errors
    ///
    /// - `UnsupportedServiceType` when no adapter serves the type
    /// - `DirectoryUnavailable` when the directory's store is unreachable
    pub async fn discover(
        &self,
        service_type: ServiceType,
        filter: &ProviderFilter,
    ) -> Result<Vec<Provider>> {
        self.directory.discover(service_type, filter).await
    }

    /// Price the request and attach the breakdown. Allowed in any
    /// non-terminal state; the state itself does not change, and each call
    /// recomputes the quote in full; the last attached value is
    /// authoritative.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` / `StoreUnavailable` from the store
    /// - `InvalidStateTransition` when the request is terminal
    /// - `InvalidParameters` / `UnsupportedServiceType` from the engine
    pub async fn price(&self, id: RequestId, params: &QuoteParams) -> Result<PriceBreakdown> {
        // A concurrent forward transition between our read and write is not
        // a pricing conflict; re-read and re-attach, bounded.
        for _ in 0..PRICE_ATTEMPTS {
            let mut request = self.fetch(id).await?;
            if request.state.is_terminal() {
                return Err(Error::InvalidStateTransition {
                    request_id: id,
                    from: request.state,
                    operation: "price",
                });
            }
            let breakdown = self
                .pricing
                .quote(request.service_type, params, self.clock.now())?;
            let current = request.state;
            request.price_breakdown = Some(breakdown.clone());
            if self.store.update_if_state(current, &request).await? == UpdateOutcome::Applied {
                tracing::debug!(
                    request_id = %id,
                    total = %breakdown.total,
                    "price attached"
                );
                return Ok(breakdown);
            }
        }
        let latest = self.fetch(id).await?;
        Err(Error::InvalidStateTransition {
            request_id: id,
            from: latest.state,
            operation: "price",
        })
    }

    /// Bind a provider and transition `pending → assigned`.
    ///
    /// An explicit `provider_id` wins; otherwise the directory is consulted
    /// with `filter` and the first candidate is bound. Re-running with the
    /// provider already bound is a no-op success; with a different provider
    /// it is `InvalidStateTransition`, never a silent overwrite.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` when not `pending` (including losing a
    ///   race to a different assignment)
    /// - `NoProviderAvailable` when resolution finds no candidate
    /// - `DirectoryUnavailable` / `StoreUnavailable` from the
    ///   infrastructure
    pub async fn assign(
        &self,
        id: RequestId,
        provider_id: Option<ProviderId>,
        filter: &ProviderFilter,
    ) -> Result<ServiceRequest> {
        let request = self.fetch(id).await?;
        match request.state {
            RequestState::Pending => {},
            RequestState::Assigned
                if provider_id.is_some() && request.provider_id == provider_id =>
            {
                // Retry of an assignment that already landed.
                return Ok(request);
            },
            from => {
                return Err(Error::InvalidStateTransition {
                    request_id: id,
                    from,
                    operation: "assign",
                });
            },
        }

        let provider_id = match provider_id {
            Some(provider_id) => provider_id,
            None => {
                let candidates = self.directory.discover(request.service_type, filter).await?;
                candidates
                    .into_iter()
                    .next()
                    .map(|p| p.id)
                    .ok_or(Error::NoProviderAvailable {
                        service_type: request.service_type,
                    })?
            },
        };

        let mut updated = request;
        updated.state = RequestState::Assigned;
        updated.provider_id = Some(provider_id.clone());
        updated.assigned_at = Some(self.clock.now());

        match self
            .store
            .update_if_state(RequestState::Pending, &updated)
            .await?
        {
            UpdateOutcome::Applied => {
                log_transition(id, RequestState::Pending, RequestState::Assigned);
                Ok(updated)
            },
            UpdateOutcome::StateMismatch => {
                let latest = self.fetch(id).await?;
                if latest.state == RequestState::Assigned
                    && latest.provider_id.as_ref() == Some(&provider_id)
                {
                    // Lost the race to an identical assignment.
                    Ok(latest)
                } else {
                    Err(Error::InvalidStateTransition {
                        request_id: id,
                        from: latest.state,
                        operation: "assign",
                    })
                }
            },
        }
    }

    /// Record commitment intent: `assigned → confirmed`.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when not `assigned`, plus store errors.
    pub async fn confirm(&self, id: RequestId) -> Result<ServiceRequest> {
        self.transition(
            id,
            "confirm",
            &[RequestState::Assigned],
            RequestState::Confirmed,
            |request, now| request.confirmed_at = Some(now),
        )
        .await
    }

    /// Begin execution: `confirmed → active`.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when not `confirmed`, plus store errors.
    pub async fn execute(&self, id: RequestId) -> Result<ServiceRequest> {
        self.transition(
            id,
            "execute",
            &[RequestState::Confirmed],
            RequestState::Active,
            |request, now| request.started_at = Some(now),
        )
        .await
    }

    /// Finish execution: `active → completed`, attaching settlement data.
    ///
    /// When `settlement` is absent (or carries no final price), the last
    /// attached quote total is carried over as the final price.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when not `active`, plus store errors.
    pub async fn complete(
        &self,
        id: RequestId,
        settlement: Option<Settlement>,
    ) -> Result<ServiceRequest> {
        self.transition(
            id,
            "complete",
            &[RequestState::Active],
            RequestState::Completed,
            |request, now| {
                let mut settlement = settlement.unwrap_or_default();
                if settlement.final_price.is_none() {
                    settlement.final_price =
                        request.price_breakdown.as_ref().map(|b| b.total);
                }
                request.settlement = Some(settlement);
                request.completed_at = Some(now);
            },
        )
        .await
    }

    /// Cancel the request, recording an optional reason. Permitted from
    /// `pending`, `assigned`, and `confirmed` only; once execution starts
    /// the request must run to completion. Any provider binding is released,
    /// so only non-cancelled post-assign states carry one.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` when `active` or `completed`, plus store
    /// errors.
    pub async fn cancel(&self, id: RequestId, reason: Option<String>) -> Result<ServiceRequest> {
        self.transition(
            id,
            "cancel",
            &[
                RequestState::Pending,
                RequestState::Assigned,
                RequestState::Confirmed,
            ],
            RequestState::Cancelled,
            |request, now| {
                request.provider_id = None;
                request.cancellation_reason = reason;
                request.cancelled_at = Some(now);
            },
        )
        .await
    }

    /// Shared transition shape: re-read, validate the precondition, apply
    /// the stage effect, land through the conditional write.
    ///
    /// A request already in the target state is a no-op success (the retry
    /// path after a failed call), as is losing the conditional write to a
    /// concurrent identical transition. Any other mismatch is
    /// `InvalidStateTransition` against the freshly read state.
    async fn transition(
        &self,
        id: RequestId,
        operation: &'static str,
        permitted: &[RequestState],
        target: RequestState,
        apply: impl FnOnce(&mut ServiceRequest, DateTime<Utc>),
    ) -> Result<ServiceRequest> {
        let current = self.fetch(id).await?;
        if current.state == target {
            return Ok(current);
        }
        if !permitted.contains(&current.state) {
            return Err(Error::InvalidStateTransition {
                request_id: id,
                from: current.state,
                operation,
            });
        }

        let from = current.state;
        let mut updated = current;
        updated.state = target;
        apply(&mut updated, self.clock.now());

        match self.store.update_if_state(from, &updated).await? {
            UpdateOutcome::Applied => {
                log_transition(id, from, target);
                Ok(updated)
            },
            UpdateOutcome::StateMismatch => {
                let latest = self.fetch(id).await?;
                if latest.state == target {
                    Ok(latest)
                } else {
                    Err(Error::InvalidStateTransition {
                        request_id: id,
                        from: latest.state,
                        operation,
                    })
                }
            },
        }
    }
}

fn log_transition(id: RequestId, from: RequestState, to: RequestState) {
    tracing::info!(request_id = %id, from = %from, to = %to, "state transition");
}
