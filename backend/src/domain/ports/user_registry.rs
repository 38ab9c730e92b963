//! Driven port for idempotent voter registration.
use async_trait::async_trait;

use crate::domain::{HashedSlackId, SlackId, Voter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user registry adapters.
    pub enum UserRegistryError {
        /// The store could not be reached.
        Connection { message: String } => "user registry connection failed: {message}",
        /// A lookup or upsert failed during execution.
        Query { message: String } => "user registry query failed: {message}",
    }
}

/// Ensures a voter record exists for an external identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Return the stored voter for `slack_id`, creating it on first sight.
    ///
    /// Existing records are returned untouched; a new record starts with a
    /// zero vote count and the default username. A concurrent creation of the
    /// same identity must resolve to the single stored row rather than an
    /// error. `Ok(None)` means the store produced no row at all.
    async fn ensure_user(
        &self,
        slack_id: &SlackId,
        hashed_slack_id: &HashedSlackId,
    ) -> Result<Option<Voter>, UserRegistryError>;
}
