//! Vote submission service.
//!
//! Hexagonal layout: [`domain`] holds the voting model, ports, and workflow;
//! [`inbound`] adapts HTTP requests onto the driving port; [`outbound`]
//! implements the driven ports over PostgreSQL; [`server`] wires them into an
//! Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
