//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, decoded from a JWT Bearer token.
//! - [`rbac::RequireRead`], [`rbac::RequireWrite`], [`rbac::RequireDelete`]
//!   -- reject callers whose role lacks the capability.

pub mod auth;
pub mod rbac;
