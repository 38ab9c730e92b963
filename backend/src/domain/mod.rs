//! Domain primitives, ports, and the vote submission service.
//!
//! Purpose: define strongly typed voting entities and the business rules
//! around them, independent of HTTP and storage. Adapters depend on this
//! module; it depends on nothing outside it.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.
//! - [`Voter`], [`Submission`], [`Ballot`]: the voting model.
//! - [`ports`]: driven and driving port traits.
//! - [`VoteService`]: the workflow behind `POST /vote`.

pub mod error;
pub mod ports;
pub mod submission;
pub mod trace_id;
pub mod vote;
pub mod vote_service;
pub mod voter;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::submission::{
    Category, Submission, SubmissionId, SubmissionKey, SubmissionValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vote::{Ballot, BallotValidationError, MAX_VOTES_PER_USER};
pub use self::vote_service::VoteService;
pub use self::voter::{
    DEFAULT_USERNAME_PREFIX, HashedSlackId, SlackId, Username, Voter, VoterValidationError,
};
