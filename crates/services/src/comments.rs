//! # CommentService
//!
//! Nested CRUD under a post. Listing and creating check the parent post
//! first — a missing parent is not-found, never unauthorized. Update and
//! destroy address the comment directly and judge only its own owner.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::validation;
use domains::{AppError, Comment, CommentRepo, PostRepo, Result};

pub struct CommentService {
    posts: Arc<dyn PostRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepo>, comments: Arc<dyn CommentRepo>) -> Self {
        Self { posts, comments }
    }

    pub async fn list(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        self.require_post(post_id).await?;
        self.comments.list_for_post(post_id).await
    }

    /// Any authenticated user may comment on any existing post; the
    /// comment's owner is the caller, unconditionally.
    pub async fn create(&self, caller: Uuid, post_id: Uuid, body: String) -> Result<Comment> {
        self.require_post(post_id).await?;
        let errors = validation::validate_comment_body(&body);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        let comment = Comment {
            id: Uuid::now_v7(),
            post_id,
            user_id: caller,
            body,
            created_at: Utc::now(),
        };
        self.comments.insert(&comment).await?;
        Ok(comment)
    }

    pub async fn update(&self, caller: Uuid, id: Uuid, body: Option<String>) -> Result<Comment> {
        let mut comment = self.fetch_owned(caller, id, "update").await?;
        if let Some(body) = body {
            let errors = validation::validate_comment_body(&body);
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }
            comment.body = body;
        }
        self.comments.update(&comment).await?;
        Ok(comment)
    }

    pub async fn destroy(&self, caller: Uuid, id: Uuid) -> Result<()> {
        self.fetch_owned(caller, id, "delete").await?;
        self.comments.delete(id).await
    }

    async fn require_post(&self, post_id: Uuid) -> Result<()> {
        self.posts
            .find(post_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Post"))
    }

    async fn fetch_owned(&self, caller: Uuid, id: Uuid, verb: &str) -> Result<Comment> {
        let comment = self
            .comments
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))?;
        if comment.user_id != caller {
            return Err(AppError::Unauthorized(format!(
                "Not authorized to {verb} this comment"
            )));
        }
        Ok(comment)
    }
}
