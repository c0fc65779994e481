//! # Courseload DB
//!
//! Persistence for the Courseload API.
//!
//! Handlers talk to the [`UserRepository`] and [`CourseRepository`] traits.
//! Two implementations exist: [`PgStore`] on PostgreSQL and [`InMemoryStore`]
//! for tests and database-less development. Every operation reads or writes a
//! single row, and `save` is last-write-wins.
//!
//! # Example
//!
//! ```ignore
//! use courseload_db::{PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store = PgStore::new(pool);
//! store.migrate().await?;
//! ```

pub mod memory;
pub mod postgres;
pub mod repository;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use courseload_core::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use repository::{CourseRepository, UserRepository};
pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a PostgreSQL connection pool.
///
/// The first connection is established eagerly so an unreachable database is
/// reported at startup rather than on the first request.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}
