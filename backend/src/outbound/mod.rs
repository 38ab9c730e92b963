//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL registries and vote ledger over Diesel.
//!
//! Adapters translate between storage rows and domain values and carry no
//! business rules.

pub mod persistence;
