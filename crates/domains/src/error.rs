//! # AppError
//!
//! Centralized error handling for the Quill ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., User, Post, Comment). Carries the
    /// message rendered to the client, e.g. "Post not found".
    #[error("{0}")]
    NotFound(String),

    /// One or more field validation failures, in declaration order.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Authentication or ownership failure.
    #[error("{0}")]
    Unauthorized(String),

    /// Infrastructure failure (e.g., DB down, media store unwritable).
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(format!("{resource} not found"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for Quill logic.
pub type Result<T> = std::result::Result<T, AppError>;
