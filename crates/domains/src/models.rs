//! # Domain Models
//!
//! These structs represent the core entities of Quill.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account holder. Owns posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Globally unique and immutable once set.
    pub email: String,
    /// Argon2 PHC string. Never leaves the backend.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Media id of the attached avatar, if any.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A blog entry. Always owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    /// Comma-delimited list, at least one non-blank segment.
    pub tags: String,
    pub created_at: DateTime<Utc>,
}

/// A reply attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One durable queue entry for the deferred post deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledDeletion {
    pub id: Uuid,
    pub post_id: Uuid,
    /// The job must not fire before this instant.
    pub run_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Raw bytes of an uploaded image, already transport-decoded.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Signup input. The password travels in plain text only this far.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Profile update input. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// Carried only so change attempts can be rejected; email is immutable
    /// after signup. Supplying the stored value verbatim is a no-op.
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub tags: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
}
