//! Diesel table definitions for the voting schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered voters keyed by their external Slack identity.
    users (id) {
        id -> Int4,
        /// External identity; unique.
        slack_id -> Varchar,
        hashed_slack_id -> Varchar,
        username -> Varchar,
        /// Accepted votes owned by this voter, constrained to `0..=3`.
        vote_count -> Int4,
    }
}

diesel::table! {
    /// Submissions, unique per `(submission_id, category)`.
    submissions (id) {
        id -> Int4,
        submission_id -> Varchar,
        category -> Varchar,
        votes -> Int4,
    }
}

diesel::table! {
    /// Immutable ballots, unique per `(submission_id, slack_id, category)`.
    votes (id) {
        id -> Int4,
        /// Surrogate key of the referenced submission.
        submission_id -> Int4,
        slack_id -> Varchar,
        category -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(votes -> submissions (submission_id));

diesel::allow_tables_to_appear_in_same_query!(submissions, users, votes);
