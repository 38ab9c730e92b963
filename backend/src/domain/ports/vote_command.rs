//! Driving port for casting votes.
//!
//! Inbound adapters hand a validated [`Ballot`] to a [`VoteCommand`] and map
//! the resulting [`Error`] onto their transport.

use async_trait::async_trait;

use crate::domain::{Ballot, Error};

/// Casts validated ballots on behalf of inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCommand: Send + Sync {
    /// Cast `ballot`, enforcing the vote limit and duplicate-vote rules.
    ///
    /// # Errors
    ///
    /// - `Conflict` when the voter is at the limit or already voted for the
    ///   same submission in the same category.
    /// - `InternalError` for any storage failure.
    async fn submit(&self, ballot: Ballot) -> Result<(), Error>;
}

/// Fixture implementation that accepts every ballot without storing it.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCommand;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl VoteCommand for FixtureVoteCommand {
    async fn submit(&self, _ballot: Ballot) -> Result<(), Error> {
        Ok(())
    }
}
