//! In-process port implementations for tests.
//!
//! [`InMemoryVoteStore`] implements the user registry, submission registry,
//! and vote ledger over a single mutex-guarded state. It enforces the same
//! uniqueness and vote-limit rules as the PostgreSQL schema, so HTTP-level
//! behaviour can be exercised without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    SubmissionRegistry, SubmissionRegistryError, UserRegistry, UserRegistryError, VoteCommand,
    VoteLedger, VoteLedgerError,
};
use crate::domain::{
    Category, HashedSlackId, MAX_VOTES_PER_USER, SlackId, Submission, SubmissionId,
    SubmissionKey, Username, VoteService, Voter,
};

/// A stored ballot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRecord {
    pub submission: SubmissionKey,
    pub slack_id: SlackId,
    pub category: Category,
}

#[derive(Debug, Default)]
struct StoreState {
    voters: Vec<Voter>,
    submissions: Vec<Submission>,
    votes: Vec<VoteRecord>,
}

/// Mutex-guarded store implementing every driven port.
///
/// Every operation holds the lock for its whole duration, so `record_vote` is
/// atomic in the same way the database transaction is.
#[derive(Debug, Default)]
pub struct InMemoryVoteStore {
    state: Mutex<StoreState>,
}

impl InMemoryVoteStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A [`VoteService`] whose three ports all point at `store`.
    pub fn vote_command(store: &Arc<Self>) -> Arc<dyn VoteCommand> {
        Arc::new(VoteService::new(
            Arc::clone(store),
            Arc::clone(store),
            Arc::clone(store),
        ))
    }

    /// Snapshot of stored voters in insertion order.
    pub fn voters(&self) -> Vec<Voter> {
        self.lock().voters.clone()
    }

    /// Snapshot of stored submissions in insertion order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.lock().submissions.clone()
    }

    /// Snapshot of stored ballots in insertion order.
    pub fn votes(&self) -> Vec<VoteRecord> {
        self.lock().votes.clone()
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |len| len.saturating_add(1))
}

fn bump(voter: &Voter) -> Voter {
    Voter::new(
        voter.id(),
        voter.slack_id().clone(),
        voter.hashed_slack_id().clone(),
        voter.username().clone(),
        voter.vote_count() + 1,
    )
}

#[async_trait]
impl UserRegistry for InMemoryVoteStore {
    async fn ensure_user(
        &self,
        slack_id: &SlackId,
        hashed_slack_id: &HashedSlackId,
    ) -> Result<Option<Voter>, UserRegistryError> {
        let mut state = self.lock();
        if let Some(existing) = state.voters.iter().find(|v| v.slack_id() == slack_id) {
            return Ok(Some(existing.clone()));
        }
        let voter = Voter::new(
            next_id(state.voters.len()),
            slack_id.clone(),
            hashed_slack_id.clone(),
            Username::default_for(slack_id),
            0,
        );
        state.voters.push(voter.clone());
        Ok(Some(voter))
    }
}

#[async_trait]
impl SubmissionRegistry for InMemoryVoteStore {
    async fn ensure_submission(
        &self,
        submission_id: &SubmissionId,
        category: &Category,
    ) -> Result<Option<Submission>, SubmissionRegistryError> {
        let mut state = self.lock();
        if let Some(existing) = state
            .submissions
            .iter()
            .find(|s| s.submission_id() == submission_id && s.category() == category)
        {
            return Ok(Some(existing.clone()));
        }
        let submission = Submission::new(
            SubmissionKey::new(next_id(state.submissions.len())),
            submission_id.clone(),
            category.clone(),
            0,
        );
        state.submissions.push(submission.clone());
        Ok(Some(submission))
    }
}

#[async_trait]
impl VoteLedger for InMemoryVoteStore {
    async fn has_voted(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<bool, VoteLedgerError> {
        Ok(self.lock().votes.iter().any(|vote| {
            vote.submission == submission && &vote.slack_id == slack_id && &vote.category == category
        }))
    }

    async fn record_vote(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<(), VoteLedgerError> {
        let mut state = self.lock();
        let duplicate = state.votes.iter().any(|vote| {
            vote.submission == submission && &vote.slack_id == slack_id && &vote.category == category
        });
        if duplicate {
            return Err(VoteLedgerError::duplicate_vote());
        }

        let voter_index = state
            .voters
            .iter()
            .position(|v| v.slack_id() == slack_id)
            .ok_or_else(|| VoteLedgerError::query("voter is not registered"))?;
        let submission_index = state
            .submissions
            .iter()
            .position(|s| s.key() == submission)
            .ok_or_else(|| VoteLedgerError::query("submission is not registered"))?;
        if state.voters[voter_index].has_reached_limit(MAX_VOTES_PER_USER) {
            return Err(VoteLedgerError::vote_limit_reached());
        }

        let voter = bump(&state.voters[voter_index]);
        state.voters[voter_index] = voter;
        let current = &state.submissions[submission_index];
        let updated = Submission::new(
            current.key(),
            current.submission_id().clone(),
            current.category().clone(),
            current.votes() + 1,
        );
        state.submissions[submission_index] = updated;
        state.votes.push(VoteRecord {
            submission,
            slack_id: slack_id.clone(),
            category: category.clone(),
        });
        Ok(())
    }
}
