//! Voter identity and the persisted voter record.

use std::fmt;

/// Prefix prepended to the Slack identity to form a default display name.
pub const DEFAULT_USERNAME_PREFIX: &str = "user_";

/// Validation errors returned by the voter identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoterValidationError {
    /// The Slack identity was blank.
    EmptySlackId,
    /// The hashed Slack identity was blank.
    EmptyHashedSlackId,
}

impl fmt::Display for VoterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySlackId => write!(f, "slackID must not be empty"),
            Self::EmptyHashedSlackId => write!(f, "hashedSlackID must not be empty"),
        }
    }
}

impl std::error::Error for VoterValidationError {}

/// External opaque identity of a voter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlackId(String);

impl SlackId {
    /// Validate and construct a [`SlackId`].
    ///
    /// The value is kept verbatim; only blank input is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, VoterValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(VoterValidationError::EmptySlackId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for SlackId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SlackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashed form of the voter identity, stored alongside the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashedSlackId(String);

impl HashedSlackId {
    /// Validate and construct a [`HashedSlackId`].
    pub fn new(value: impl Into<String>) -> Result<Self, VoterValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(VoterValidationError::EmptyHashedSlackId);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for HashedSlackId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HashedSlackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name stored for a voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Display name assigned when a voter is first registered.
    ///
    /// # Examples
    /// ```
    /// use vote_backend::domain::{SlackId, Username};
    ///
    /// let slack_id = SlackId::new("U123").expect("valid id");
    /// assert_eq!(Username::default_for(&slack_id).as_ref(), "user_U123");
    /// ```
    pub fn default_for(slack_id: &SlackId) -> Self {
        Self(format!("{DEFAULT_USERNAME_PREFIX}{slack_id}"))
    }

    /// Wrap a display name read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered voter as currently stored.
///
/// `vote_count` is the live value observed when the record was read; it is
/// never assumed to be zero for a record that already existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    id: i32,
    slack_id: SlackId,
    hashed_slack_id: HashedSlackId,
    username: Username,
    vote_count: u32,
}

impl Voter {
    /// Assemble a voter from stored or freshly created values.
    pub fn new(
        id: i32,
        slack_id: SlackId,
        hashed_slack_id: HashedSlackId,
        username: Username,
        vote_count: u32,
    ) -> Self {
        Self {
            id,
            slack_id,
            hashed_slack_id,
            username,
            vote_count,
        }
    }

    /// Internal surrogate key.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// External identity.
    pub fn slack_id(&self) -> &SlackId {
        &self.slack_id
    }

    /// Hashed identity recorded at registration.
    pub fn hashed_slack_id(&self) -> &HashedSlackId {
        &self.hashed_slack_id
    }

    /// Display name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Number of accepted votes owned by this voter.
    pub fn vote_count(&self) -> u32 {
        self.vote_count
    }

    /// Whether the voter has used every vote they are allowed.
    pub fn has_reached_limit(&self, limit: u32) -> bool {
        self.vote_count >= limit
    }
}
