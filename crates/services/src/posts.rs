//! # PostService
//!
//! Ownership-scoped CRUD on posts. Creation also books the post's own
//! deletion 24 hours out (configurable for tests); the enqueue is
//! fire-and-forget from the caller's point of view.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use domains::validation;
use domains::{AppError, DeletionQueue, NewPost, Post, PostChanges, PostRepo, Result};

pub struct PostService {
    posts: Arc<dyn PostRepo>,
    queue: Arc<dyn DeletionQueue>,
    /// How long a post lives before the deferred deletion fires.
    ttl: Duration,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepo>, queue: Arc<dyn DeletionQueue>, ttl: Duration) -> Self {
        Self { posts, queue, ttl }
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.posts.list().await
    }

    pub async fn show(&self, id: Uuid) -> Result<Post> {
        self.posts
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post"))
    }

    /// The owner is the caller, unconditionally — never client input.
    pub async fn create(&self, owner: Uuid, fields: NewPost) -> Result<Post> {
        let post = Post {
            id: Uuid::now_v7(),
            user_id: owner,
            title: fields.title,
            body: fields.body,
            tags: fields.tags,
            created_at: Utc::now(),
        };
        let errors = validation::validate_post(&post);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        self.posts.insert(&post).await?;

        // A lost enqueue leaves the post in place until the owner deletes
        // it; that is acceptable, so the request itself never fails here.
        let run_at = post.created_at + self.ttl;
        if let Err(err) = self.queue.schedule(post.id, run_at).await {
            tracing::warn!(post_id = %post.id, %err, "failed to schedule deferred deletion");
        }
        Ok(post)
    }

    pub async fn update(&self, caller: Uuid, id: Uuid, changes: PostChanges) -> Result<Post> {
        let mut post = self.fetch_owned(caller, id, "update").await?;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(body) = changes.body {
            post.body = body;
        }
        if let Some(tags) = changes.tags {
            post.tags = tags;
        }
        let errors = validation::validate_post(&post);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        self.posts.update(&post).await?;
        Ok(post)
    }

    pub async fn destroy(&self, caller: Uuid, id: Uuid) -> Result<()> {
        self.fetch_owned(caller, id, "delete").await?;
        self.posts.delete(id).await
    }

    // Existence is revealed to any authenticated caller; only then is
    // ownership judged.
    async fn fetch_owned(&self, caller: Uuid, id: Uuid, verb: &str) -> Result<Post> {
        let post = self
            .posts
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post"))?;
        if post.user_id != caller {
            return Err(AppError::Unauthorized(format!(
                "Not authorized to {verb} this post"
            )));
        }
        Ok(post)
    }
}
