//! PostgreSQL-backed `SubmissionRegistry`.
//!
//! Mirrors the voter registry: a lookup on `(submission_id, category)` and,
//! when absent, an upsert against the composite unique constraint that
//! always returns the live row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubmissionRegistry, SubmissionRegistryError};
use crate::domain::{Category, Submission, SubmissionId, SubmissionKey};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSubmissionRow, SubmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::submissions;

/// Diesel implementation of the [`SubmissionRegistry`] port.
#[derive(Clone)]
pub struct DieselSubmissionRegistry {
    pool: DbPool,
}

impl DieselSubmissionRegistry {
    /// Create a registry backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SubmissionRegistryError {
    map_pool_error(error, |message| SubmissionRegistryError::connection(message))
}

fn map_error(error: diesel::result::Error, operation: &'static str) -> SubmissionRegistryError {
    map_diesel_error(
        error,
        operation,
        |message| SubmissionRegistryError::query(message),
        |message| SubmissionRegistryError::connection(message),
    )
}

fn row_to_submission(row: SubmissionRow) -> Result<Submission, SubmissionRegistryError> {
    let invalid =
        |detail: String| SubmissionRegistryError::query(format!("invalid stored submission: {detail}"));
    let submission_id = SubmissionId::new(row.submission_id).map_err(|err| invalid(err.to_string()))?;
    let category = Category::new(row.category).map_err(|err| invalid(err.to_string()))?;
    let votes =
        u32::try_from(row.votes).map_err(|_| invalid(format!("negative vote total {}", row.votes)))?;
    Ok(Submission::new(
        SubmissionKey::new(row.id),
        submission_id,
        category,
        votes,
    ))
}

#[async_trait]
impl SubmissionRegistry for DieselSubmissionRegistry {
    async fn ensure_submission(
        &self,
        submission_id: &SubmissionId,
        category: &Category,
    ) -> Result<Option<Submission>, SubmissionRegistryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let existing = submissions::table
            .filter(submissions::submission_id.eq(submission_id.as_ref()))
            .filter(submissions::category.eq(category.as_ref()))
            .select(SubmissionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, "lookup submission"))?;
        if let Some(row) = existing {
            return row_to_submission(row).map(Some);
        }

        let new_row = NewSubmissionRow {
            submission_id: submission_id.as_ref(),
            category: category.as_ref(),
            votes: 0,
        };

        diesel::insert_into(submissions::table)
            .values(&new_row)
            .on_conflict((submissions::submission_id, submissions::category))
            .do_update()
            .set(submissions::submission_id.eq(excluded(submissions::submission_id)))
            .returning(SubmissionRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(err, "upsert submission"))?
            .map(row_to_submission)
            .transpose()
    }
}
