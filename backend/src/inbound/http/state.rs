//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::VoteCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Driving port for `POST /vote`.
    pub votes: Arc<dyn VoteCommand>,
}

impl HttpState {
    /// Bundle the vote command for handlers.
    pub fn new(votes: Arc<dyn VoteCommand>) -> Self {
        Self { votes }
    }
}
