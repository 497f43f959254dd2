//! The per-request authorization guard.
//!
//! `CurrentUser` is an extractor, so adding it to a handler's signature is
//! what protects the route — the handler body never runs without a
//! resolved identity. Signup and login are the only handlers without it.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use domains::{AppError, User};

use crate::error::ApiError;
use crate::state::AppState;

pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        // Missing header, undecodable token and vanished user all collapse
        // into the same unauthorized response — nothing to enumerate.
        let user = match bearer {
            Some(token) => state.accounts.resolve_token(token).await?,
            None => None,
        };
        user.map(CurrentUser)
            .ok_or_else(|| ApiError(AppError::Unauthorized("Not Authorized".to_string())))
    }
}
