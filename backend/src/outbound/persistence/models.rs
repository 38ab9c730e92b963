//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them into
//! domain values before returning.

use diesel::prelude::*;

use super::schema::{submissions, users, votes};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoterRow {
    pub id: i32,
    pub slack_id: String,
    pub hashed_slack_id: String,
    pub username: String,
    pub vote_count: i32,
}

/// Insertable voter with a zero vote count.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewVoterRow<'a> {
    pub slack_id: &'a str,
    pub hashed_slack_id: &'a str,
    pub username: &'a str,
    pub vote_count: i32,
}

/// Row read from the `submissions` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubmissionRow {
    pub id: i32,
    pub submission_id: String,
    pub category: String,
    pub votes: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = submissions)]
pub(crate) struct NewSubmissionRow<'a> {
    pub submission_id: &'a str,
    pub category: &'a str,
    pub votes: i32,
}

/// Insertable ballot. `created_at` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow<'a> {
    pub submission_id: i32,
    pub slack_id: &'a str,
    pub category: &'a str,
}
