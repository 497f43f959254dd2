//! # domains
//!
//! The central domain logic and interface definitions for Quill: entities,
//! pure validation rules, the error taxonomy, and the port traits every
//! adapter plugs into.

pub mod error;
pub mod models;
pub mod ports;
pub mod validation;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
