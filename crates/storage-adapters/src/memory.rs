//! In-memory adapters over one shared `MemDb`.
//!
//! The repos mirror the Postgres adapters' semantics — including explicit
//! cascades — against concurrent maps. Tests and database-less local runs
//! wire these in place of the `postgres` module.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use domains::{
    Comment, CommentRepo, DeletionQueue, MediaStore, Post, PostRepo, Result, ScheduledDeletion,
    User, UserRepo,
};

/// The single point of shared state, standing in for the relational store.
/// Maps are public so tests can inspect rows or backdate timestamps.
#[derive(Default)]
pub struct MemDb {
    pub users: DashMap<Uuid, User>,
    pub posts: DashMap<Uuid, Post>,
    pub comments: DashMap<Uuid, Comment>,
    pub jobs: DashMap<Uuid, ScheduledDeletion>,
}

impl MemDb {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn delete_post_cascade(&self, post_id: Uuid) {
        self.comments.retain(|_, c| c.post_id != post_id);
        self.posts.remove(&post_id);
    }
}

pub struct MemUserRepo(pub Arc<MemDb>);

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn insert(&self, user: &User) -> Result<()> {
        self.0.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.0.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .0
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn email_taken(&self, email: &str) -> Result<bool> {
        Ok(self.0.users.iter().any(|u| u.email == email))
    }

    async fn update(&self, user: &User) -> Result<()> {
        self.0.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let owned_posts: Vec<Uuid> = self
            .0
            .posts
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        self.0.comments.retain(|_, c| c.user_id != id);
        for post_id in owned_posts {
            self.0.delete_post_cascade(post_id);
        }
        self.0.users.remove(&id);
        Ok(())
    }
}

pub struct MemPostRepo(pub Arc<MemDb>);

#[async_trait]
impl PostRepo for MemPostRepo {
    async fn insert(&self, post: &Post) -> Result<()> {
        self.0.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        Ok(self.0.posts.get(&id).map(|p| p.clone()))
    }

    async fn list(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self.0.posts.iter().map(|p| p.clone()).collect();
        // UUIDv7 ids are time-ordered, so this matches insertion order.
        posts.sort_by_key(|p| p.id);
        Ok(posts)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        self.0.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.0.delete_post_cascade(id);
        Ok(())
    }
}

pub struct MemCommentRepo(pub Arc<MemDb>);

#[async_trait]
impl CommentRepo for MemCommentRepo {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        self.0.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.0.comments.get(&id).map(|c| c.clone()))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .0
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.clone())
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        self.0.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.0.comments.remove(&id);
        Ok(())
    }
}

pub struct MemDeletionQueue(pub Arc<MemDb>);

#[async_trait]
impl DeletionQueue for MemDeletionQueue {
    async fn schedule(&self, post_id: Uuid, run_at: DateTime<Utc>) -> Result<()> {
        let job = ScheduledDeletion {
            id: Uuid::new_v4(),
            post_id,
            run_at,
            completed_at: None,
        };
        self.0.jobs.insert(job.id, job);
        Ok(())
    }

    async fn due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledDeletion>> {
        let mut due: Vec<ScheduledDeletion> = self
            .0
            .jobs
            .iter()
            .filter(|j| j.run_at <= now && j.completed_at.is_none())
            .map(|j| j.clone())
            .collect();
        due.sort_by_key(|j| j.run_at);
        Ok(due)
    }

    async fn mark_done(&self, job_id: Uuid) -> Result<()> {
        if let Some(mut job) = self.0.jobs.get_mut(&job_id) {
            job.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

/// Media store that remembers nothing but the hash→URL mapping contract.
/// Useful where tests need an attachment without touching the filesystem.
#[derive(Default)]
pub struct MemMediaStore {
    pub saved: DashMap<String, Vec<u8>>,
}

#[async_trait]
impl MediaStore for MemMediaStore {
    async fn save(&self, data: Vec<u8>, _content_type: &str) -> Result<String> {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let id = hex::encode(hasher.finalize());
        self.saved.insert(id.clone(), data);
        Ok(id)
    }

    fn url(&self, media_id: &str) -> String {
        format!("/media/{media_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Uuid) -> User {
        User {
            id,
            name: "A".to_string(),
            email: format!("{id}@x.com"),
            password_hash: "$argon2$stub".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    fn post(id: Uuid, owner: Uuid) -> Post {
        Post {
            id,
            user_id: owner,
            title: "T".to_string(),
            body: "B".to_string(),
            tags: "t1".to_string(),
            created_at: Utc::now(),
        }
    }

    fn comment(post_id: Uuid, owner: Uuid) -> Comment {
        Comment {
            id: Uuid::now_v7(),
            post_id,
            user_id: owner,
            body: "c".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_through_posts_and_comments() {
        let db = MemDb::shared();
        let users = MemUserRepo(db.clone());
        let posts = MemPostRepo(db.clone());
        let comments = MemCommentRepo(db.clone());

        let owner = Uuid::now_v7();
        let bystander = Uuid::now_v7();
        users.insert(&user(owner)).await.unwrap();
        users.insert(&user(bystander)).await.unwrap();

        let owned_post = Uuid::now_v7();
        let other_post = Uuid::now_v7();
        posts.insert(&post(owned_post, owner)).await.unwrap();
        posts.insert(&post(other_post, bystander)).await.unwrap();

        // A stranger's comment on the owner's post dies with the post; the
        // owner's comment elsewhere dies with the account.
        comments.insert(&comment(owned_post, bystander)).await.unwrap();
        comments.insert(&comment(other_post, owner)).await.unwrap();

        users.delete(owner).await.unwrap();

        assert!(db.users.get(&owner).is_none());
        assert!(db.posts.get(&owned_post).is_none());
        assert!(db.posts.get(&other_post).is_some());
        assert!(db.comments.is_empty());
    }

    #[tokio::test]
    async fn queue_due_respects_run_at_and_completion() {
        let db = MemDb::shared();
        let queue = MemDeletionQueue(db.clone());
        let now = Utc::now();

        queue
            .schedule(Uuid::now_v7(), now - chrono::Duration::minutes(1))
            .await
            .unwrap();
        queue
            .schedule(Uuid::now_v7(), now + chrono::Duration::hours(24))
            .await
            .unwrap();

        let due = queue.due(now).await.unwrap();
        assert_eq!(due.len(), 1);

        queue.mark_done(due[0].id).await.unwrap();
        assert!(queue.due(now).await.unwrap().is_empty());
    }
}
