//! # Postgres adapters
//!
//! This module implements the data mapping between the relational model
//! and the `domains` entities. All queries are runtime-checked sqlx; every
//! cascading delete runs inside one transaction.

mod comments;
mod jobs;
mod posts;
mod users;

pub use comments::PgCommentRepo;
pub use jobs::PgDeletionQueue;
pub use posts::PgPostRepo;
pub use users::PgUserRepo;

use domains::AppError;

// Infrastructure failures surface as `Internal`; callers never see
// driver-level detail.
pub(crate) fn db_err(err: sqlx::Error) -> AppError {
    AppError::internal(err)
}
