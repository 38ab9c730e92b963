//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`UserRegistry`], [`SubmissionRegistry`], [`VoteLedger`]) are
//! implemented by outbound persistence adapters. The driving port
//! [`VoteCommand`] is consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod submission_registry;
mod user_registry;
mod vote_command;
mod vote_ledger;

#[cfg(test)]
pub use submission_registry::MockSubmissionRegistry;
pub use submission_registry::{SubmissionRegistry, SubmissionRegistryError};
#[cfg(test)]
pub use user_registry::MockUserRegistry;
pub use user_registry::{UserRegistry, UserRegistryError};
#[cfg(test)]
pub use vote_command::MockVoteCommand;
pub use vote_command::VoteCommand;
#[cfg(any(test, feature = "test-support"))]
pub use vote_command::FixtureVoteCommand;
#[cfg(test)]
pub use vote_ledger::MockVoteLedger;
pub use vote_ledger::{VoteLedger, VoteLedgerError};
