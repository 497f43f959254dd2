//! # RetentionSweeper
//!
//! The deferred-deletion consumer. Drains due queue entries and deletes the
//! posts they point at, provided the post still exists and is old enough.
//! Delivery is at-least-once, so every branch of the action is a safe no-op
//! on a repeat fire.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use domains::{DeletionQueue, PostRepo, Result};

pub struct RetentionSweeper {
    posts: Arc<dyn PostRepo>,
    queue: Arc<dyn DeletionQueue>,
    /// Minimum age a post must have reached before the job may delete it.
    ttl: Duration,
}

impl RetentionSweeper {
    pub fn new(posts: Arc<dyn PostRepo>, queue: Arc<dyn DeletionQueue>, ttl: Duration) -> Self {
        Self { posts, queue, ttl }
    }

    /// Processes every entry due at `now`; returns how many posts were
    /// actually deleted. A failing entry is logged and left in the queue
    /// for the next pass.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut deleted = 0;
        for job in self.queue.due(now).await? {
            match self.fire(&job, now).await {
                Ok(did_delete) => {
                    deleted += usize::from(did_delete);
                    self.queue.mark_done(job.id).await?;
                }
                Err(err) => {
                    tracing::warn!(job_id = %job.id, post_id = %job.post_id, %err,
                        "deferred deletion failed; will retry");
                }
            }
        }
        Ok(deleted)
    }

    /// Runs `run_once` forever on a fixed period. Errors are logged and the
    /// loop keeps going; correctness never depends on this task running.
    pub async fn run(&self, period: std::time::Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.run_once(Utc::now()).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(deleted = n, "retention sweep removed expired posts"),
                Err(err) => tracing::error!(%err, "retention sweep failed"),
            }
        }
    }

    async fn fire(&self, job: &domains::ScheduledDeletion, now: DateTime<Utc>) -> Result<bool> {
        match self.posts.find(job.post_id).await? {
            // Already gone — deleted by its owner or by a prior fire.
            None => Ok(false),
            Some(post) => {
                if now - post.created_at >= self.ttl {
                    tracing::info!(post_id = %post.id, title = %post.title, "deleting expired post");
                    self.posts.delete(post.id).await?;
                    Ok(true)
                } else {
                    // Younger than the TTL (clock skew or a rescheduled
                    // row): do not delete and do not reschedule.
                    Ok(false)
                }
            }
        }
    }
}
