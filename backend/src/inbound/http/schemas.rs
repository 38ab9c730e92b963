//! OpenAPI schema definitions for wire types that have no `ToSchema` derive.
//!
//! The error envelope is serialised by the `ResponseError` impl from
//! [`crate::domain::Error`], and the vote payload is read leniently so that
//! missing fields produce a friendly 400. These wrappers document the strict
//! wire shape instead.

use utoipa::ToSchema;

/// Error response payload.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Human-readable reason for the failure.
    #[schema(example = "User U123 has reached the maximum vote count of 3")]
    error: String,
}

/// Vote request payload: four required, non-null strings.
#[derive(ToSchema)]
#[schema(as = VoteRequest)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct VoteRequestSchema {
    /// External submission identifier, unique within a category.
    #[schema(rename = "submissionId", example = "s1")]
    submission_id: String,
    /// Voter's Slack identity.
    #[schema(rename = "slackID", example = "U123")]
    slack_id: String,
    /// Hashed form of the Slack identity.
    #[schema(rename = "hashedSlackID", example = "5d41402abc4b2a76")]
    hashed_slack_id: String,
    /// Voting category.
    #[schema(example = "art")]
    category: String,
}
