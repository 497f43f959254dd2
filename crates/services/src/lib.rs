//! # services
//!
//! Application services for Quill. Each service owns the business rules for
//! one resource and talks to the outside world through the `domains` ports.
//! Caller identity is always an explicit parameter — there is no ambient
//! "current user" anywhere in this crate.

pub mod accounts;
pub mod comments;
pub mod posts;
pub mod retention;

pub use accounts::AccountService;
pub use comments::CommentService;
pub use posts::PostService;
pub use retention::RetentionSweeper;
