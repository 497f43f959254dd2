//! Test harness: the real router wired over in-memory adapters.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so the full stack —
//! extractors, guard, handlers, services — runs exactly as in production,
//! with only the edges (storage, media) swapped for memory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Duration;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use api_adapters::AppState;
use auth_adapters::{Argon2Hasher, JwtTokenCodec};
use domains::{
    CommentRepo, DeletionQueue, MediaStore, PasswordHasher, PostRepo, TokenCodec, UserRepo,
};
use services::{AccountService, CommentService, PostService, RetentionSweeper};
use storage_adapters::memory::{
    MemCommentRepo, MemDeletionQueue, MemMediaStore, MemPostRepo, MemUserRepo,
};
use storage_adapters::MemDb;

pub fn post_ttl() -> Duration {
    Duration::hours(24)
}

pub struct TestApp {
    pub router: Router,
    /// The backing store, exposed so tests can inspect rows or backdate
    /// timestamps the way a 24-hour wait would.
    pub db: Arc<MemDb>,
    pub sweeper: RetentionSweeper,
}

pub fn test_app() -> TestApp {
    let db = MemDb::shared();
    let users: Arc<dyn UserRepo> = Arc::new(MemUserRepo(db.clone()));
    let posts: Arc<dyn PostRepo> = Arc::new(MemPostRepo(db.clone()));
    let comments: Arc<dyn CommentRepo> = Arc::new(MemCommentRepo(db.clone()));
    let queue: Arc<dyn DeletionQueue> = Arc::new(MemDeletionQueue(db.clone()));
    let media: Arc<dyn MediaStore> = Arc::new(MemMediaStore::default());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher);
    let tokens: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::new(b"test-secret"));

    let state = AppState {
        accounts: Arc::new(AccountService::new(
            users,
            hasher,
            tokens,
            media.clone(),
        )),
        posts: Arc::new(PostService::new(posts.clone(), queue.clone(), post_ttl())),
        comments: Arc::new(CommentService::new(posts.clone(), comments)),
        media,
    };
    let sweeper = RetentionSweeper::new(posts, queue, post_ttl());

    TestApp {
        router: api_adapters::router(state),
        db,
        sweeper,
    }
}

/// Sends one request and returns status plus parsed body (Null when empty).
pub async fn request(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request build"),
        None => builder.body(Body::empty()).expect("request build"),
    };

    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("router never errors");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

/// Registers an account and returns `(user_id, token)`.
pub async fn signup(app: &TestApp, email: &str, password: &str) -> (Uuid, String) {
    let name: String = Name().fake();
    let (status, body) = request(
        app,
        "POST",
        "/signup",
        None,
        Some(json!({
            "user": {
                "name": name,
                "email": email,
                "password": password,
                "password_confirmation": password,
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let id = body["user"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("user id in signup response");
    let token = body["token"].as_str().expect("token in signup response");
    (id, token.to_string())
}

/// Creates a post as `token` and returns its id.
pub async fn create_post(app: &TestApp, token: &str, title: &str) -> Uuid {
    let (status, body) = request(
        app,
        "POST",
        "/posts",
        Some(token),
        Some(json!({ "post": { "title": title, "tags": "t1", "body": "B" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "post creation failed: {body}");
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("post id in response")
}

/// Creates a comment as `token` and returns its id.
pub async fn create_comment(app: &TestApp, token: &str, post_id: Uuid, body_text: &str) -> Uuid {
    let (status, body) = request(
        app,
        "POST",
        &format!("/posts/{post_id}/comments"),
        Some(token),
        Some(json!({ "comment": { "body": body_text } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "comment creation failed: {body}");
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("comment id in response")
}
