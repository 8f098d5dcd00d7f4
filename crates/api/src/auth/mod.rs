//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`provider`] -- the static and profile-table [`AuthProvider`](ambiental_core::auth::AuthProvider)s.

pub mod jwt;
pub mod password;
pub mod provider;
