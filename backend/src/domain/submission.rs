//! Category-scoped submissions that receive votes.

use std::fmt;

/// Validation errors returned by the submission identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionValidationError {
    /// The submission identifier was blank.
    EmptySubmissionId,
    /// The category was blank.
    EmptyCategory,
}

impl fmt::Display for SubmissionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubmissionId => write!(f, "submissionId must not be empty"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
        }
    }
}

impl std::error::Error for SubmissionValidationError {}

/// External identifier of a submission. Not unique across categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Validate and construct a [`SubmissionId`], rejecting blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, SubmissionValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SubmissionValidationError::EmptySubmissionId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Voting category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Validate and construct a [`Category`], rejecting blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, SubmissionValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SubmissionValidationError::EmptyCategory);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned surrogate key of a submission.
///
/// Votes reference submissions through this key rather than the external
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionKey(i32);

impl SubmissionKey {
    /// Wrap a key assigned by the store.
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw key.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission as currently stored, identified by `(submission_id, category)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    key: SubmissionKey,
    submission_id: SubmissionId,
    category: Category,
    votes: u32,
}

impl Submission {
    /// Assemble a submission from stored or freshly created values.
    pub fn new(
        key: SubmissionKey,
        submission_id: SubmissionId,
        category: Category,
        votes: u32,
    ) -> Self {
        Self {
            key,
            submission_id,
            category,
            votes,
        }
    }

    /// Surrogate key referenced by votes.
    pub fn key(&self) -> SubmissionKey {
        self.key
    }

    /// External identifier.
    pub fn submission_id(&self) -> &SubmissionId {
        &self.submission_id
    }

    /// Category the submission competes in.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Live number of votes referencing this submission.
    pub fn votes(&self) -> u32 {
        self.votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn submission_id_rejects_blank_input() {
        assert_eq!(
            SubmissionId::new(" "),
            Err(SubmissionValidationError::EmptySubmissionId)
        );
    }

    #[rstest]
    fn category_rejects_blank_input() {
        assert_eq!(Category::new(""), Err(SubmissionValidationError::EmptyCategory));
    }

    #[rstest]
    fn key_round_trips_the_raw_value() {
        assert_eq!(SubmissionKey::new(42).get(), 42);
    }
}
