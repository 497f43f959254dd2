//! Post CRUD. Owner comes from the verified identity, never the payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use domains::{NewPost, Post, PostChanges};

use crate::dto::{NewPostRequest, PostUpdateRequest};
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

pub async fn show(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.show(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(req): Json<NewPostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let params = req.post;
    let post = state
        .posts
        .create(
            caller.id,
            NewPost {
                title: params.title,
                body: params.body,
                tags: params.tags,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<PostUpdateRequest>,
) -> Result<Json<Post>, ApiError> {
    let params = req.post;
    let post = state
        .posts
        .update(
            caller.id,
            id,
            PostChanges {
                title: params.title,
                body: params.body,
                tags: params.tags,
            },
        )
        .await?;
    Ok(Json(post))
}

pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.posts.destroy(caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
