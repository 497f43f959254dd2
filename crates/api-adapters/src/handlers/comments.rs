//! Comment CRUD, nested under a post.
//!
//! List and create resolve the parent first, so a missing post reads as
//! not-found there. Update and destroy address the comment by id; the
//! `post_id` path segment is routing context only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use domains::Comment;

use crate::dto::{CommentUpdateRequest, NewCommentRequest};
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.comments.list(post_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(post_id): Path<Uuid>,
    Json(req): Json<NewCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state
        .comments
        .create(caller.id, post_id, req.comment.body)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path((_post_id, id)): Path<(Uuid, Uuid)>,
    Json(req): Json<CommentUpdateRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.comments.update(caller.id, id, req.comment.body).await?;
    Ok(Json(comment))
}

pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path((_post_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.comments.destroy(caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
