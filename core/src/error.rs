//! The Wayfare error taxonomy.
//!
//! One typed enum, shared by every component. The lifecycle controller never
//! swallows an error from the pricing engine, the provider directory, or the
//! store: it propagates the kind unchanged, enriched with the request id
//! where it has one. Callers decide whether to retry: only the
//! infrastructure kinds ([`Error::is_transient`]) are candidates for
//! automatic retry with backoff; everything else needs caller correction.

use crate::ids::RequestId;
use crate::request::RequestState;
use crate::service::ServiceType;
use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure kinds the orchestrator can surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed creation input: the details bag failed schema validation or
    /// does not match the declared service type. Fix the input; do not retry.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What failed validation.
        reason: String,
    },

    /// Pricing input missing, out of range, or mismatched with the service
    /// type. Fix the input; do not retry.
    #[error("invalid pricing parameters ({field}): {reason}")]
    InvalidParameters {
        /// The offending parameter field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Operation attempted from a state that does not permit it. Also the
    /// outcome of losing a concurrent-transition race: re-fetch the current
    /// state and decide what to do next.
    #[error("request {request_id}: cannot {operation} from state {from}")]
    InvalidStateTransition {
        /// The request the operation targeted.
        request_id: RequestId,
        /// The state the request was found in.
        from: RequestState,
        /// The operation that was rejected.
        operation: &'static str,
    },

    /// The directory returned no candidates at assign time and the caller
    /// supplied no explicit provider. Transient from the caller's point of
    /// view (retry later), but not a candidate for blind automatic retry.
    #[error("no provider available for service type {service_type}")]
    NoProviderAvailable {
        /// The service type that had no candidates.
        service_type: ServiceType,
    },

    /// The provider directory's backing store could not be reached.
    /// Retryable with backoff.
    #[error("provider directory unavailable: {reason}")]
    DirectoryUnavailable {
        /// Underlying failure description.
        reason: String,
    },

    /// The durable request store could not be reached. Retryable with
    /// backoff.
    #[error("store unavailable: {reason}")]
    StoreUnavailable {
        /// Underlying failure description.
        reason: String,
    },

    /// No adapter is registered for the requested service type. A
    /// configuration/deployment error; not retryable.
    #[error("unsupported service type: {service_type}")]
    UnsupportedServiceType {
        /// The unregistered service type.
        service_type: ServiceType,
    },

    /// No request exists under the given id. Not retryable.
    #[error("request not found: {0}")]
    RequestNotFound(RequestId),
}

impl Error {
    /// Whether this kind stems from unreachable infrastructure and may be
    /// retried automatically (exponential backoff, bounded attempts).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::DirectoryUnavailable { .. } | Self::StoreUnavailable { .. }
        )
    }
}
