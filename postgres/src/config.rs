//! Connection configuration for the Postgres-backed components.

use wayfare_core::{Error, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Connection settings for [`PostgresRequestStore`](crate::PostgresRequestStore)
/// and [`PostgresDirectoryAdapter`](crate::PostgresDirectoryAdapter).
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long to wait for a connection before failing.
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    /// Configuration for `url` with default pool settings.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from the environment: `DATABASE_URL` (required),
    /// `WAYFARE_PG_MAX_CONNECTIONS` and `WAYFARE_PG_CONNECT_TIMEOUT_SECS`
    /// (optional, defaulted).
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when `DATABASE_URL` is unset or an override does not
    /// parse as an integer. A misconfigured deployment is an operator
    /// mistake, not a transient store outage, so it is not retryable.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("DATABASE_URL").ok_or_else(|| Error::InvalidRequest {
            reason: "DATABASE_URL is not set".into(),
        })?;
        let mut config = Self::new(url);
        if let Some(max) = parse_override(&lookup, "WAYFARE_PG_MAX_CONNECTIONS")? {
            config.max_connections =
                u32::try_from(max).map_err(|_| invalid_override("WAYFARE_PG_MAX_CONNECTIONS"))?;
        }
        if let Some(timeout) = parse_override(&lookup, "WAYFARE_PG_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout_secs = timeout;
        }
        Ok(config)
    }
}

fn parse_override(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| invalid_override(name)),
        None => Ok(None),
    }
}

fn invalid_override(name: &'static str) -> Error {
    Error::InvalidRequest {
        reason: format!("{name} is not a valid integer"),
    }
}
