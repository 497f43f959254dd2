//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.
//! Services depend on the traits alone, so storage, auth and media
//! implementations stay swappable (and mockable under the `testing` feature).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Comment, Post, ScheduledDeletion, User};

/// Data persistence contract for user accounts.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn email_taken(&self, email: &str) -> Result<bool>;
    async fn update(&self, user: &User) -> Result<()>;

    /// Deletes the user together with every post and comment the user owns
    /// and every comment under those posts, atomically.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Data persistence contract for posts.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: &Post) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<Post>>;
    async fn list(&self) -> Result<Vec<Post>>;
    async fn update(&self, post: &Post) -> Result<()>;

    /// Deletes the post and its comments atomically.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Data persistence contract for comments.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;
    async fn find(&self, id: Uuid) -> Result<Option<Comment>>;
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn update(&self, comment: &Comment) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Media storage contract for image attachments.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Saves raw bytes and returns a media id for the owning record.
    async fn save(&self, data: Vec<u8>, content_type: &str) -> Result<String>;
    /// Returns the public URL for a stored media id.
    fn url(&self, media_id: &str) -> String;
}

/// Durable "run at-or-after time T" contract for deferred post deletion.
///
/// The queue promises at-least-once delivery; consumers must stay
/// idempotent. There is no cancellation — a fired job that finds its post
/// already gone is a no-op.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait DeletionQueue: Send + Sync {
    async fn schedule(&self, post_id: Uuid, run_at: DateTime<Utc>) -> Result<()>;

    /// Entries whose `run_at` has passed and which are not yet marked done.
    async fn due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledDeletion>>;

    async fn mark_done(&self, job_id: Uuid) -> Result<()>;
}

/// Password hashing contract.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String>;
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Bearer token contract binding a request to a user id.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait TokenCodec: Send + Sync {
    fn issue(&self, user_id: Uuid) -> Result<String>;

    /// Fails open to `None` on any decode or signature error — malformed,
    /// tampered and wrong-algorithm tokens all resolve to "no identity".
    fn verify(&self, token: &str) -> Option<Uuid>;
}
