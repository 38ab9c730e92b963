//! PostgreSQL-backed `UserRegistry`.
//!
//! Registration is lookup-then-upsert. The upsert targets the `slack_id`
//! unique constraint and rewrites the key column to itself on conflict, so a
//! concurrent first-time registration returns the winner's row through
//! `RETURNING` instead of raising a uniqueness error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRegistry, UserRegistryError};
use crate::domain::{HashedSlackId, SlackId, Username, Voter};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewVoterRow, VoterRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the [`UserRegistry`] port.
#[derive(Clone)]
pub struct DieselUserRegistry {
    pool: DbPool,
}

impl DieselUserRegistry {
    /// Create a registry backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRegistryError {
    map_pool_error(error, |message| UserRegistryError::connection(message))
}

fn map_error(error: diesel::result::Error, operation: &'static str) -> UserRegistryError {
    map_diesel_error(
        error,
        operation,
        |message| UserRegistryError::query(message),
        |message| UserRegistryError::connection(message),
    )
}

fn row_to_voter(row: VoterRow) -> Result<Voter, UserRegistryError> {
    let invalid = |detail: String| UserRegistryError::query(format!("invalid stored voter: {detail}"));
    let slack_id = SlackId::new(row.slack_id).map_err(|err| invalid(err.to_string()))?;
    let hashed_slack_id =
        HashedSlackId::new(row.hashed_slack_id).map_err(|err| invalid(err.to_string()))?;
    let vote_count = u32::try_from(row.vote_count)
        .map_err(|_| invalid(format!("negative vote count {}", row.vote_count)))?;
    Ok(Voter::new(
        row.id,
        slack_id,
        hashed_slack_id,
        Username::from_stored(row.username),
        vote_count,
    ))
}

#[async_trait]
impl UserRegistry for DieselUserRegistry {
    async fn ensure_user(
        &self,
        slack_id: &SlackId,
        hashed_slack_id: &HashedSlackId,
    ) -> Result<Option<Voter>, UserRegistryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let existing = users::table
            .filter(users::slack_id.eq(slack_id.as_ref()))
            .select(VoterRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, "lookup voter"))?;
        if let Some(row) = existing {
            return row_to_voter(row).map(Some);
        }

        let username = Username::default_for(slack_id);
        let new_row = NewVoterRow {
            slack_id: slack_id.as_ref(),
            hashed_slack_id: hashed_slack_id.as_ref(),
            username: username.as_ref(),
            vote_count: 0,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::slack_id)
            .do_update()
            .set(users::slack_id.eq(excluded(users::slack_id)))
            .returning(VoterRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, "upsert voter"))?
            .map(row_to_voter)
            .transpose()
    }
}
