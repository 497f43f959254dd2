//! # Quill Binary
//!
//! The entry point that assembles the application: settings, Postgres pool
//! and migrations, adapters, services, the retention worker, and finally
//! the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use api_adapters::AppState;
use auth_adapters::{Argon2Hasher, JwtTokenCodec};
use domains::{
    CommentRepo, DeletionQueue, MediaStore, PasswordHasher, PostRepo, TokenCodec, UserRepo,
};
use services::{AccountService, CommentService, PostService, RetentionSweeper};
use storage_adapters::{LocalMediaStore, PgCommentRepo, PgDeletionQueue, PgPostRepo, PgUserRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = configs::load().context("failed to load configuration")?;

    // 1. Database
    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(settings.database.url.expose_secret())
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    // 2. Adapters
    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let posts: Arc<dyn PostRepo> = Arc::new(PgPostRepo::new(pool.clone()));
    let comments: Arc<dyn CommentRepo> = Arc::new(PgCommentRepo::new(pool.clone()));
    let queue: Arc<dyn DeletionQueue> = Arc::new(PgDeletionQueue::new(pool));
    let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        settings.media.root.clone().into(),
        settings.media.url_prefix.clone(),
    ));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher);
    let tokens: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
    ));

    // 3. Services
    let ttl = chrono::Duration::hours(settings.retention.post_ttl_hours);
    let state = AppState {
        accounts: Arc::new(AccountService::new(
            users,
            hasher,
            tokens,
            media.clone(),
        )),
        posts: Arc::new(PostService::new(posts.clone(), queue.clone(), ttl)),
        comments: Arc::new(CommentService::new(posts.clone(), comments)),
        media,
    };

    // 4. Deferred deletion worker, out of band from request handling
    let sweeper = RetentionSweeper::new(posts, queue, ttl);
    let period = std::time::Duration::from_secs(settings.retention.sweep_seconds);
    tokio::spawn(async move { sweeper.run(period).await });

    // 5. Serve
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "quill listening");
    axum::serve(listener, api_adapters::router(state))
        .await
        .context("server exited")?;
    Ok(())
}
