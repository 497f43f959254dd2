//! Signup, login and profile management.
//!
//! Signup and login are the two unguarded routes; update and destroy go
//! through `CurrentUser` like everything else.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use domains::{NewUser, UserChanges};

use crate::dto::{
    AuthResponse, LoginRequest, SignupRequest, UserBody, UserResponse, UserUpdateRequest,
};
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let params = req.user;
    let image = params.image.map(|payload| payload.decode()).transpose()?;
    let (user, token) = state
        .accounts
        .signup(NewUser {
            name: params.name,
            email: params.email,
            password: params.password,
            password_confirmation: params.password_confirmation,
            image,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserBody::render(&user, state.media.as_ref()),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(AuthResponse {
        user: UserBody::render(&user, state.media.as_ref()),
        token,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let params = req.user;
    let image = params.image.map(|payload| payload.decode()).transpose()?;
    let user = state
        .accounts
        .update(
            caller.id,
            id,
            UserChanges {
                email: params.email,
                name: params.name,
                password: params.password,
                password_confirmation: params.password_confirmation,
                image,
            },
        )
        .await?;
    Ok(Json(UserResponse {
        user: UserBody::render(&user, state.media.as_ref()),
    }))
}

pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.accounts.destroy(caller.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
