//! Durable deletion queue backed by the `scheduled_deletions` table.
//!
//! Rows are kept after completion (with `completed_at` set) so a fire is
//! never re-delivered; the consumer's idempotence covers the window where
//! the delete succeeded but `mark_done` did not.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{DeletionQueue, Result, ScheduledDeletion};

use super::db_err;

pub struct PgDeletionQueue {
    pool: PgPool,
}

impl PgDeletionQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    post_id: Uuid,
    run_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl From<JobRow> for ScheduledDeletion {
    fn from(row: JobRow) -> Self {
        ScheduledDeletion {
            id: row.id,
            post_id: row.post_id,
            run_at: row.run_at,
            completed_at: row.completed_at,
        }
    }
}

#[async_trait]
impl DeletionQueue for PgDeletionQueue {
    async fn schedule(&self, post_id: Uuid, run_at: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO scheduled_deletions (id, post_id, run_at) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(post_id)
            .bind(run_at)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledDeletion>> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT id, post_id, run_at, completed_at FROM scheduled_deletions \
             WHERE run_at <= $1 AND completed_at IS NULL ORDER BY run_at ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(ScheduledDeletion::from).collect())
    }

    async fn mark_done(&self, job_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE scheduled_deletions SET completed_at = $2 WHERE id = $1")
            .bind(job_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
