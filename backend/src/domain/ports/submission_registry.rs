//! Driven port for idempotent submission registration.
use async_trait::async_trait;

use crate::domain::{Category, Submission, SubmissionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by submission registry adapters.
    pub enum SubmissionRegistryError {
        /// The store could not be reached.
        Connection { message: String } => "submission registry connection failed: {message}",
        /// A lookup or upsert failed during execution.
        Query { message: String } => "submission registry query failed: {message}",
    }
}

/// Ensures a submission record exists for a `(submission_id, category)` pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRegistry: Send + Sync {
    /// Return the live stored submission, creating it with zero votes if absent.
    async fn ensure_submission(
        &self,
        submission_id: &SubmissionId,
        category: &Category,
    ) -> Result<Option<Submission>, SubmissionRegistryError>;
}
