//! Route table.

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{comments, posts, users};
use crate::state::AppState;

/// Builds the full application router. Mountable under a prefix if a
/// deployment ever needs one.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
        .route("/users/{id}", put(users::update).delete(users::destroy))
        .route("/posts", get(posts::index).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::show).put(posts::update).delete(posts::destroy),
        )
        .route(
            "/posts/{post_id}/comments",
            get(comments::index).post(comments::create),
        )
        .route(
            "/posts/{post_id}/comments/{id}",
            put(comments::update).delete(comments::destroy),
        )
        // Liveness probe for load balancers and uptime monitors.
        .route("/up", get(|| async { StatusCode::OK }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
