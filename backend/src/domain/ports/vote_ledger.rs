//! Driven port for reading and recording votes.
//!
//! Recording a vote is atomic: the vote row and both denormalised counters
//! (the submission's `votes` and the voter's `vote_count`) move together or
//! not at all.
use async_trait::async_trait;

use crate::domain::{Category, SlackId, SubmissionKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vote ledger adapters.
    pub enum VoteLedgerError {
        /// The store could not be reached.
        Connection { message: String } => "vote ledger connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "vote ledger query failed: {message}",
        /// The `(submission, voter, category)` triple already has a vote.
        DuplicateVote => "vote already recorded for this submission and category",
        /// The voter already holds the maximum number of votes.
        VoteLimitReached => "voter has reached the vote limit",
    }
}

/// Reads and records ballots together with their denormalised counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Whether `slack_id` already voted for `submission` in `category`.
    async fn has_voted(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<bool, VoteLedgerError>;

    /// Record a vote and increment both counters in one transaction.
    ///
    /// # Errors
    ///
    /// - [`VoteLedgerError::DuplicateVote`] when the triple already exists.
    /// - [`VoteLedgerError::VoteLimitReached`] when the voter is at the limit.
    ///
    /// In both cases nothing is written.
    async fn record_vote(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<(), VoteLedgerError>;
}
