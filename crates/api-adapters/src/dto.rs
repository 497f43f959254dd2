//! Wire types.
//!
//! Requests wrap their fields in a resource envelope (`{"user": {...}}`,
//! `{"post": {...}}`, `{"comment": {...}}`); login alone is flat. Missing
//! creation fields default to empty strings so they fail validation with a
//! message instead of failing deserialization.

use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{AppError, ImageUpload, MediaStore, User};

use crate::error::ApiError;

// ── Requests ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub user: SignupParams,
}

#[derive(Deserialize)]
pub struct SignupParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub password_confirmation: Option<String>,
    pub image: Option<ImagePayload>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct UserUpdateRequest {
    pub user: UserUpdateParams,
}

#[derive(Deserialize, Default)]
pub struct UserUpdateParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub image: Option<ImagePayload>,
}

/// Images travel as base64 inside the JSON payload.
#[derive(Deserialize)]
pub struct ImagePayload {
    pub data: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    "application/octet-stream".to_string()
}

impl ImagePayload {
    pub fn decode(self) -> Result<ImageUpload, ApiError> {
        let data = base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|_| {
                ApiError(AppError::validation("Image must be valid base64-encoded data"))
            })?;
        Ok(ImageUpload {
            data,
            content_type: self.content_type,
        })
    }
}

#[derive(Deserialize)]
pub struct NewPostRequest {
    pub post: NewPostParams,
}

#[derive(Deserialize)]
pub struct NewPostParams {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Deserialize)]
pub struct PostUpdateRequest {
    pub post: PostUpdateParams,
}

#[derive(Deserialize, Default)]
pub struct PostUpdateParams {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<String>,
}

#[derive(Deserialize)]
pub struct NewCommentRequest {
    pub comment: NewCommentParams,
}

#[derive(Deserialize)]
pub struct NewCommentParams {
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct CommentUpdateRequest {
    pub comment: CommentUpdateParams,
}

#[derive(Deserialize, Default)]
pub struct CommentUpdateParams {
    pub body: Option<String>,
}

// ── Responses ────────────────────────────────────────────────────────────

/// The public projection of a user. The hash and the raw media id never
/// leave the backend.
#[derive(Serialize)]
pub struct UserBody {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}

impl UserBody {
    pub fn render(user: &User, media: &dyn MediaStore) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            image_url: user.image.as_deref().map(|id| media.url(id)),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserBody,
    pub token: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserBody,
}
