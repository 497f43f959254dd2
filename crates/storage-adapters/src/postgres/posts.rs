use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Post, PostRepo, Result};

use super::db_err;

pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    body: String,
    tags: String,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            tags: row.tags,
            created_at: row.created_at,
        }
    }
}

const COLUMNS: &str = "id, user_id, title, body, tags, created_at";

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn insert(&self, post: &Post) -> Result<()> {
        sqlx::query(
            "INSERT INTO posts (id, user_id, title, body, tags, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.tags)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        let row =
            sqlx::query_as::<_, PostRow>(&format!("SELECT {COLUMNS} FROM posts WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Post::from))
    }

    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {COLUMNS} FROM posts ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        sqlx::query("UPDATE posts SET title = $2, body = $3, tags = $4 WHERE id = $1")
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(&post.tags)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Comments go first so the post row never becomes an orphaned parent,
    /// even on a mid-transaction failure.
    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)
    }
}
