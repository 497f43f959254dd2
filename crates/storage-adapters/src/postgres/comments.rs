use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Comment, CommentRepo, Result};

use super::db_err;

pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, post_id, user_id, body, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.body)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, user_id, body, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Comment::from))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, user_id, body, created_at FROM comments \
             WHERE post_id = $1 ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        sqlx::query("UPDATE comments SET body = $2 WHERE id = $1")
            .bind(comment.id)
            .bind(&comment.body)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
