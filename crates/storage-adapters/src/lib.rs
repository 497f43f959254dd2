//! # storage-adapters
//!
//! Concrete implementations of the `domains` persistence and media ports.
//!
//! - `postgres` (feature `db-postgres`): sqlx-backed repos and the durable
//!   deletion queue. Cascading deletes are explicit, single-transaction
//!   statements — never left to foreign-key wiring.
//! - `media_local` (feature `media-local`): content-addressed filesystem
//!   store with a 300×300 variant per image.
//! - `memory`: always-compiled in-memory adapters for tests and local runs
//!   without a database.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

#[cfg(feature = "media-local")]
pub mod media_local;

pub use memory::MemDb;

#[cfg(feature = "db-postgres")]
pub use postgres::{PgCommentRepo, PgDeletionQueue, PgPostRepo, PgUserRepo};

#[cfg(feature = "media-local")]
pub use media_local::LocalMediaStore;
