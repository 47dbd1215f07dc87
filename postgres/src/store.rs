//! The Postgres-backed request store.

use crate::config::PostgresConfig;
use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use wayfare_core::{
    Error, RequestId, RequestState, RequestStore, Result, ServiceRequest, UpdateOutcome,
};

/// Production [`RequestStore`] over a Postgres pool.
///
/// One row per request. The lifecycle state lives in its own column so a
/// transition is a single conditional `UPDATE ... WHERE id = $n AND
/// state = $n`; Postgres row locking makes that atomic with respect to
/// concurrent controllers, and `rows_affected == 0` reports the mismatch
/// without a round trip. The full record rides along as a JSONB payload.
#[derive(Clone)]
pub struct PostgresRequestStore {
    pool: PgPool,
}

impl PostgresRequestStore {
    /// Connect a pool using `config`.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` when the database cannot be reached.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(store_unavailable)?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for sharing with other Postgres components.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it does not exist. Idempotent; safe to run on
    /// every startup.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` when the database cannot be reached.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS service_requests (
                id UUID PRIMARY KEY,
                service_type TEXT NOT NULL,
                state TEXT NOT NULL,
                provider_id TEXT,
                payload JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS service_requests_state_idx
                ON service_requests (state, service_type)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS providers (
                id TEXT PRIMARY KEY,
                service_type TEXT NOT NULL,
                available BOOLEAN NOT NULL,
                rating DOUBLE PRECISION NOT NULL,
                payload JSONB NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;

        tracing::info!("schema migration applied");
        Ok(())
    }
}

#[async_trait]
impl RequestStore for PostgresRequestStore {
    async fn insert(&self, request: &ServiceRequest) -> Result<()> {
        let payload = to_payload(request)?;
        sqlx::query(
            r"
            INSERT INTO service_requests (
                id, service_type, state, provider_id, payload, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(request.id.as_uuid())
        .bind(request.service_type.as_str())
        .bind(request.state.as_str())
        .bind(request.provider_id.as_ref().map(ToString::to_string))
        .bind(payload)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;
        Ok(())
    }

    async fn fetch(&self, id: RequestId) -> Result<Option<ServiceRequest>> {
        let row = sqlx::query(
            r"
            SELECT payload FROM service_requests WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_unavailable)?;

        match row {
            Some(row) => {
                let payload: serde_json::Value =
                    row.try_get("payload").map_err(store_unavailable)?;
                from_payload(payload).map(Some)
            },
            None => Ok(None),
        }
    }

    async fn update_if_state(
        &self,
        expected: RequestState,
        updated: &ServiceRequest,
    ) -> Result<UpdateOutcome> {
        let payload = to_payload(updated)?;
        let result = sqlx::query(
            r"
            UPDATE service_requests
            SET state = $1,
                provider_id = $2,
                payload = $3,
                updated_at = NOW()
            WHERE id = $4 AND state = $5
            ",
        )
        .bind(updated.state.as_str())
        .bind(updated.provider_id.as_ref().map(ToString::to_string))
        .bind(payload)
        .bind(updated.id.as_uuid())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;

        if result.rows_affected() == 0 {
            // The row is absent or its state moved on. The caller re-reads
            // and classifies.
            return Ok(UpdateOutcome::StateMismatch);
        }
        Ok(UpdateOutcome::Applied)
    }
}

fn to_payload(request: &ServiceRequest) -> Result<serde_json::Value> {
    serde_json::to_value(request).map_err(|e| Error::InvalidRequest {
        reason: format!("request is not serializable: {e}"),
    })
}

fn from_payload(payload: serde_json::Value) -> Result<ServiceRequest> {
    serde_json::from_value(payload).map_err(|e| Error::StoreUnavailable {
        reason: format!("stored request payload is corrupt: {e}"),
    })
}

pub(crate) fn store_unavailable(error: sqlx::Error) -> Error {
    Error::StoreUnavailable {
        reason: error.to_string(),
    }
}
