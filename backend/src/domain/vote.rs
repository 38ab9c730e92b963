//! Ballots and the vote limit.

use std::fmt;

use super::{
    Category, HashedSlackId, SlackId, SubmissionId, SubmissionValidationError,
    VoterValidationError,
};

/// Maximum number of accepted votes per voter across all categories.
pub const MAX_VOTES_PER_USER: u32 = 3;

/// Validation failure for any ballot field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotValidationError {
    /// A voter identity field was invalid.
    Voter(VoterValidationError),
    /// A submission identity field was invalid.
    Submission(SubmissionValidationError),
}

impl fmt::Display for BallotValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voter(err) => err.fmt(f),
            Self::Submission(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for BallotValidationError {}

impl From<VoterValidationError> for BallotValidationError {
    fn from(value: VoterValidationError) -> Self {
        Self::Voter(value)
    }
}

impl From<SubmissionValidationError> for BallotValidationError {
    fn from(value: SubmissionValidationError) -> Self {
        Self::Submission(value)
    }
}

/// One voter's request to vote for a submission within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// Submission being voted for.
    pub submission_id: SubmissionId,
    /// Voter casting the ballot.
    pub slack_id: SlackId,
    /// Hashed form of the voter identity.
    pub hashed_slack_id: HashedSlackId,
    /// Category the vote applies to.
    pub category: Category,
}

impl Ballot {
    /// Validate raw request fields into a [`Ballot`].
    ///
    /// # Examples
    /// ```
    /// use vote_backend::domain::Ballot;
    ///
    /// let ballot = Ballot::try_from_parts("s1", "u1", "h1", "art").expect("valid ballot");
    /// assert_eq!(ballot.category.as_ref(), "art");
    /// assert!(Ballot::try_from_parts("s1", "", "h1", "art").is_err());
    /// ```
    pub fn try_from_parts(
        submission_id: impl Into<String>,
        slack_id: impl Into<String>,
        hashed_slack_id: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, BallotValidationError> {
        Ok(Self {
            submission_id: SubmissionId::new(submission_id)?,
            slack_id: SlackId::new(slack_id)?,
            hashed_slack_id: HashedSlackId::new(hashed_slack_id)?,
            category: Category::new(category)?,
        })
    }
}
