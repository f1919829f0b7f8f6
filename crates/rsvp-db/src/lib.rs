//! # rsvp DB
//!
//! PostgreSQL connection pool initialisation.
//!
//! # Example
//!
//! ```ignore
//! use rsvp_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = init_db_pool().await;
//!     // Use pool for database operations
//! }
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Connections held by the server pool.
const MAX_CONNECTIONS: u32 = 10;

/// How long a request may wait for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// Call once during startup; the returned pool is cheaply cloneable.
///
/// # Panics
///
/// Panics if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    connect(&database_url, MAX_CONNECTIONS)
        .await
        .expect("Failed to connect to database")
}

/// Opens a pool against `database_url` with at most `max_connections`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

pub use sqlx::PgPool;
