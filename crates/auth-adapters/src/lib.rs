//! # auth-adapters
//!
//! Credential plumbing behind the `domains` ports: argon2 password hashing,
//! and — behind the `auth-jwt` feature — the HS256 bearer token codec.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::Argon2Hasher;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenCodec;
