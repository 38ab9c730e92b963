//! OpenAPI documentation for the vote service.
//!
//! The document is not served over HTTP; `cargo run --bin openapi-dump`
//! prints it for external tooling.

use crate::inbound::http::schemas::{ErrorSchema, VoteRequestSchema};
use crate::inbound::http::votes::VoteAccepted;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vote submission API",
        description = "Records votes for categorised submissions with per-user limits."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::votes::submit_vote),
    components(schemas(VoteRequestSchema, VoteAccepted, ErrorSchema)),
    tags(
        (name = "votes", description = "Vote submission")
    )
)]
pub struct ApiDoc;
