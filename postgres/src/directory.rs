//! The Postgres-backed directory adapter.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgPool;
use wayfare_core::{Error, Provider, ProviderFilter, Result, ServiceType};
use wayfare_directory::{DirectoryAdapter, matches_filter};

/// [`DirectoryAdapter`] over the `providers` read-model table.
///
/// One adapter instance serves one service type; register one per type the
/// deployment supports, sharing the pool. Availability and minimum rating
/// are pushed into SQL; geographic radius and attribute constraints are
/// applied in process with the shared filter predicate.
#[derive(Clone)]
pub struct PostgresDirectoryAdapter {
    pool: PgPool,
    service_type: ServiceType,
}

impl PostgresDirectoryAdapter {
    /// An adapter serving `service_type` over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool, service_type: ServiceType) -> Self {
        Self { pool, service_type }
    }
}

#[async_trait]
impl DirectoryAdapter for PostgresDirectoryAdapter {
    fn service_type(&self) -> ServiceType {
        self.service_type
    }

    async fn search(&self, filter: &ProviderFilter) -> Result<Vec<Provider>> {
        let rows = sqlx::query(
            r"
            SELECT payload FROM providers
            WHERE service_type = $1
              AND (NOT $2 OR available)
              AND ($3::float8 IS NULL OR rating >= $3)
            ORDER BY rating DESC
            ",
        )
        .bind(self.service_type.as_str())
        .bind(filter.available_only)
        .bind(filter.min_rating)
        .fetch_all(&self.pool)
        .await
        .map_err(directory_unavailable)?;

        let mut providers = Vec::with_capacity(rows.len());
        for row in rows {
            let payload: serde_json::Value =
                row.try_get("payload").map_err(directory_unavailable)?;
            let provider = from_payload(payload)?;
            if matches_filter(&provider, filter) {
                providers.push(provider);
            }
        }
        Ok(providers)
    }
}

fn directory_unavailable(error: sqlx::Error) -> Error {
    Error::DirectoryUnavailable {
        reason: error.to_string(),
    }
}

fn from_payload(payload: serde_json::Value) -> Result<Provider> {
    serde_json::from_value(payload).map_err(|e| Error::DirectoryUnavailable {
        reason: format!("stored provider payload is corrupt: {e}"),
    })
}
