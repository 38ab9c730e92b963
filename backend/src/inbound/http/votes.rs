//! Vote submission HTTP handler.
//!
//! ```text
//! POST /vote {"submissionId":"s1","slackID":"u1","hashedSlackID":"h1","category":"art"}
//! ```

use actix_web::{HttpRequest, HttpResponse, web};
use actix_web::error::JsonPayloadError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Ballot, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, VoteRequestSchema};
use crate::inbound::http::state::HttpState;

const INVALID_PAYLOAD_PREFIX: &str = "Invalid vote payload";

/// Message returned when a vote is accepted.
pub const VOTE_ACCEPTED: &str = "Vote submitted successfully";

/// Request payload for casting a vote.
///
/// Fields are optional here so a missing one is reported by name; the
/// documented contract is [`VoteRequestSchema`].
#[derive(Debug, Deserialize, Serialize)]
pub struct VoteRequest {
    /// External submission identifier.
    #[serde(rename = "submissionId")]
    pub submission_id: Option<String>,
    /// Voter's Slack identity.
    #[serde(rename = "slackID")]
    pub slack_id: Option<String>,
    /// Hashed form of the Slack identity.
    #[serde(rename = "hashedSlackID")]
    pub hashed_slack_id: Option<String>,
    /// Voting category.
    pub category: Option<String>,
}

/// Response payload for an accepted vote.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VoteAccepted {
    /// Confirmation message.
    #[schema(example = "Vote submitted successfully")]
    pub success: String,
}

fn invalid_payload(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("{INVALID_PAYLOAD_PREFIX}: {reason}"))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, Error> {
    value.ok_or_else(|| invalid_payload(format!("missing field {field}")))
}

/// Read a JSON object into a [`VoteRequest`].
///
/// The extractor only accepts objects, so a positional array never reaches
/// the struct's sequence form.
fn read_vote_request(body: Map<String, Value>) -> Result<VoteRequest, Error> {
    serde_json::from_value(Value::Object(body)).map_err(invalid_payload)
}

fn parse_vote_request(payload: VoteRequest) -> Result<Ballot, Error> {
    let submission_id = required(payload.submission_id, "submissionId")?;
    let slack_id = required(payload.slack_id, "slackID")?;
    let hashed_slack_id = required(payload.hashed_slack_id, "hashedSlackID")?;
    let category = required(payload.category, "category")?;
    Ballot::try_from_parts(submission_id, slack_id, hashed_slack_id, category)
        .map_err(invalid_payload)
}

/// JSON extractor configuration for `POST /vote`.
///
/// Body parse failures become `InvalidRequest` errors so they share the
/// `{"error": ...}` envelope instead of Actix's plain-text default.
pub fn vote_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        invalid_payload(err).into()
    })
}

/// Cast a vote for a submission within a category.
#[utoipa::path(
    post,
    path = "/vote",
    request_body = VoteRequestSchema,
    responses(
        (status = 200, description = "Vote recorded", body = VoteAccepted),
        (status = 400, description = "Malformed vote payload", body = ErrorSchema),
        (status = 409, description = "Vote limit reached or duplicate vote", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["votes"],
    operation_id = "submitVote"
)]
pub async fn submit_vote(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<VoteAccepted>> {
    let ballot = parse_vote_request(read_vote_request(payload.into_inner())?)?;
    state.votes.submit(ballot).await?;
    Ok(web::Json(VoteAccepted {
        success: VOTE_ACCEPTED.to_owned(),
    }))
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not Found"))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
