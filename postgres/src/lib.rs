//! # Wayfare Postgres
//!
//! PostgreSQL implementations of the Wayfare infrastructure seams:
//!
//! - [`PostgresRequestStore`]: the durable
//!   [`RequestStore`](wayfare_core::RequestStore), one conditional `UPDATE`
//!   per state transition
//! - [`PostgresDirectoryAdapter`]: a
//!   [`DirectoryAdapter`](wayfare_directory::DirectoryAdapter) over a
//!   provider read-model table
//!
//! Records are kept as one row per request with the lifecycle state in a
//! dedicated column (so the conditional write is a plain `WHERE id AND
//! state`) and the full record as a JSONB payload (so schema churn in the
//! domain types stays out of the relational schema).
//!
//! # Example
//!
//! ```no_run
//! use wayfare_postgres::{PostgresConfig, PostgresRequestStore};
//!
//! # async fn example() -> wayfare_core::Result<()> {
//! let store = PostgresRequestStore::connect(&PostgresConfig::from_env()?).await?;
//! store.migrate().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod directory;
mod store;

pub use config::PostgresConfig;
pub use directory::PostgresDirectoryAdapter;
pub use store::PostgresRequestStore;
