//! PostgreSQL persistence adapters built on Diesel.
//!
//! Each adapter implements one domain port over a shared [`DbPool`] of
//! `diesel-async` connections. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; adapters translate
//! them into domain values and classify Diesel failures into port errors.
//!
//! ```no_run
//! use vote_backend::outbound::persistence::{DbPool, DieselUserRegistry, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/votes")).await?;
//! let users = DieselUserRegistry::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_submission_registry;
mod diesel_user_registry;
mod diesel_vote_ledger;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_submission_registry::DieselSubmissionRegistry;
pub use diesel_user_registry::DieselUserRegistry;
pub use diesel_vote_ledger::DieselVoteLedger;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
