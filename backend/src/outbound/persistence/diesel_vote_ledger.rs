//! PostgreSQL-backed `VoteLedger`.
//!
//! `record_vote` runs three statements in one transaction: insert the ballot,
//! bump the submission's `votes`, and bump the voter's `vote_count` only while
//! it is below the limit. The vote-triple unique constraint rejects
//! concurrent duplicates; the guarded update rejects concurrent over-voting.
//! Either rejection rolls the whole transaction back.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{VoteLedger, VoteLedgerError};
use crate::domain::{Category, MAX_VOTES_PER_USER, SlackId, SubmissionKey};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::NewVoteRow;
use super::pool::{DbPool, PoolError};
use super::schema::{submissions, users, votes};

/// Diesel implementation of the [`VoteLedger`] port.
#[derive(Clone)]
pub struct DieselVoteLedger {
    pool: DbPool,
}

impl DieselVoteLedger {
    /// Create a ledger backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Why a commit transaction was rolled back.
#[derive(Debug)]
enum CommitFailure {
    LimitReached,
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for CommitFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value)
    }
}

fn map_pool(error: PoolError) -> VoteLedgerError {
    map_pool_error(error, |message| VoteLedgerError::connection(message))
}

fn map_error(error: diesel::result::Error, operation: &'static str) -> VoteLedgerError {
    map_diesel_error(
        error,
        operation,
        |message| VoteLedgerError::query(message),
        |message| VoteLedgerError::connection(message),
    )
}

/// The per-voter limit in the `users.vote_count` column type.
fn vote_limit() -> Result<i32, VoteLedgerError> {
    i32::try_from(MAX_VOTES_PER_USER)
        .map_err(|_| VoteLedgerError::query("vote limit exceeds the vote_count column range"))
}

fn map_commit_failure(failure: CommitFailure) -> VoteLedgerError {
    match failure {
        CommitFailure::LimitReached => VoteLedgerError::vote_limit_reached(),
        CommitFailure::Database(error) if is_unique_violation(&error) => {
            VoteLedgerError::duplicate_vote()
        }
        CommitFailure::Database(error) => map_error(error, "record vote"),
    }
}

#[async_trait]
impl VoteLedger for DieselVoteLedger {
    async fn has_voted(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<bool, VoteLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(exists(
            votes::table
                .filter(votes::submission_id.eq(submission.get()))
                .filter(votes::slack_id.eq(slack_id.as_ref()))
                .filter(votes::category.eq(category.as_ref())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_error(err, "check prior vote"))
    }

    async fn record_vote(
        &self,
        submission: SubmissionKey,
        slack_id: &SlackId,
        category: &Category,
    ) -> Result<(), VoteLedgerError> {
        let limit = vote_limit()?;
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let new_vote = NewVoteRow {
            submission_id: submission.get(),
            slack_id: slack_id.as_ref(),
            category: category.as_ref(),
        };

        conn.transaction::<_, CommitFailure, _>(|conn| {
            async move {
                diesel::insert_into(votes::table)
                    .values(&new_vote)
                    .execute(conn)
                    .await?;

                diesel::update(submissions::table.find(new_vote.submission_id))
                    .set(submissions::votes.eq(submissions::votes + 1))
                    .execute(conn)
                    .await?;

                let charged = diesel::update(
                    users::table
                        .filter(users::slack_id.eq(new_vote.slack_id))
                        .filter(users::vote_count.lt(limit)),
                )
                .set(users::vote_count.eq(users::vote_count + 1))
                .execute(conn)
                .await?;

                if charged == 0 {
                    return Err(CommitFailure::LimitReached);
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_commit_failure)
    }
}
