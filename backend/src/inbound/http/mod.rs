//! HTTP inbound adapter exposing the voting endpoint.

pub mod error;
pub mod schemas;
pub mod state;
pub mod votes;

pub use error::ApiResult;
