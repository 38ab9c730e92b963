//! Vote submission workflow.
//!
//! [`VoteService`] implements the [`VoteCommand`] driving port by sequencing
//! the user registry, submission registry, and vote ledger. It keeps no state
//! between requests; mutual exclusion is left to the store's constraints.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    SubmissionRegistry, UserRegistry, VoteCommand, VoteLedger, VoteLedgerError,
};
use crate::domain::{Ballot, Error, MAX_VOTES_PER_USER, SlackId};

const ENSURE_USER_FAILED: &str = "Failed to ensure user exists";
const ENSURE_SUBMISSION_FAILED: &str = "Failed to ensure submission exists";
const SUBMIT_FAILED: &str = "Failed to submit vote";

/// Vote service implementing the [`VoteCommand`] port.
#[derive(Clone)]
pub struct VoteService<U, S, L> {
    users: Arc<U>,
    submissions: Arc<S>,
    ledger: Arc<L>,
}

impl<U, S, L> VoteService<U, S, L> {
    /// Create a service over the given registries and ledger.
    pub fn new(users: Arc<U>, submissions: Arc<S>, ledger: Arc<L>) -> Self {
        Self {
            users,
            submissions,
            ledger,
        }
    }
}

impl<U, S, L> VoteService<U, S, L>
where
    U: UserRegistry,
    S: SubmissionRegistry,
    L: VoteLedger,
{
    fn limit_reached(slack_id: &SlackId) -> Error {
        Error::conflict(format!(
            "User {slack_id} has reached the maximum vote count of {MAX_VOTES_PER_USER}"
        ))
    }

    fn already_voted(ballot: &Ballot) -> Error {
        Error::conflict(format!(
            "User {} has already voted for submission {} in category {}",
            ballot.slack_id, ballot.submission_id, ballot.category
        ))
    }

    fn unexpected(operation: &'static str, cause: impl fmt::Display) -> Error {
        error!(operation, error = %cause, "vote submission failed");
        Error::internal(SUBMIT_FAILED)
    }

    fn map_commit_error(ballot: &Ballot, err: VoteLedgerError) -> Error {
        match err {
            VoteLedgerError::DuplicateVote => {
                info!(
                    slack_id = %ballot.slack_id,
                    submission_id = %ballot.submission_id,
                    category = %ballot.category,
                    "concurrent duplicate vote rejected at commit"
                );
                Self::already_voted(ballot)
            }
            VoteLedgerError::VoteLimitReached => {
                info!(slack_id = %ballot.slack_id, "vote limit reached at commit");
                Self::limit_reached(&ballot.slack_id)
            }
            other => Self::unexpected("record_vote", other),
        }
    }
}

#[async_trait]
impl<U, S, L> VoteCommand for VoteService<U, S, L>
where
    U: UserRegistry,
    S: SubmissionRegistry,
    L: VoteLedger,
{
    async fn submit(&self, ballot: Ballot) -> Result<(), Error> {
        let voter = self
            .users
            .ensure_user(&ballot.slack_id, &ballot.hashed_slack_id)
            .await
            .map_err(|err| Self::unexpected("ensure_user", err))?
            .ok_or_else(|| {
                error!(slack_id = %ballot.slack_id, "user registry returned no record");
                Error::internal(ENSURE_USER_FAILED)
            })?;

        if voter.has_reached_limit(MAX_VOTES_PER_USER) {
            info!(
                slack_id = %ballot.slack_id,
                vote_count = voter.vote_count(),
                "vote rejected: limit reached"
            );
            return Err(Self::limit_reached(&ballot.slack_id));
        }

        let submission = self
            .submissions
            .ensure_submission(&ballot.submission_id, &ballot.category)
            .await
            .map_err(|err| Self::unexpected("ensure_submission", err))?
            .ok_or_else(|| {
                error!(
                    submission_id = %ballot.submission_id,
                    category = %ballot.category,
                    "submission registry returned no record"
                );
                Error::internal(ENSURE_SUBMISSION_FAILED)
            })?;

        let already_voted = self
            .ledger
            .has_voted(submission.key(), &ballot.slack_id, &ballot.category)
            .await
            .map_err(|err| Self::unexpected("has_voted", err))?;
        if already_voted {
            info!(
                slack_id = %ballot.slack_id,
                submission_id = %ballot.submission_id,
                category = %ballot.category,
                "vote rejected: duplicate"
            );
            return Err(Self::already_voted(&ballot));
        }

        self.ledger
            .record_vote(submission.key(), &ballot.slack_id, &ballot.category)
            .await
            .map_err(|err| Self::map_commit_error(&ballot, err))?;

        info!(
            slack_id = %ballot.slack_id,
            submission_id = %ballot.submission_id,
            category = %ballot.category,
            "vote accepted"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
