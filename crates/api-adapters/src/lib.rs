//! # api-adapters
//!
//! The web routing and orchestration layer for Quill. Everything here is
//! translation: JSON in, service call, JSON out. Business rules live a
//! layer down in `services`.

#[cfg(feature = "web-axum")]
pub mod dto;
#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod routes;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use routes::router;
#[cfg(feature = "web-axum")]
pub use state::AppState;
