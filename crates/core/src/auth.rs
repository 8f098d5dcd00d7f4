//! Authentication strategy seam.
//!
//! Exactly one [`AuthProvider`] is active per process, chosen by
//! configuration ([`AuthStrategy`]). Providers never fall back to one
//! another; a failed lookup is a failed login.

use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::roles::Role;

/// Message returned for any bad username/password combination.
pub const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos";

/// The identity produced by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// A source of credentials.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Verify `username` / `password`.
    ///
    /// Returns [`CoreError::Unauthorized`] for unknown users and wrong
    /// passwords alike, [`CoreError::Forbidden`] for disabled accounts.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, CoreError>;
}

/// Which [`AuthProvider`] implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Credential list supplied by configuration.
    Static,
    /// Profiles stored in the backend `profiles` table.
    Profile,
}

impl FromStr for AuthStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(AuthStrategy::Static),
            "profile" | "profiles" => Ok(AuthStrategy::Profile),
            other => Err(format!(
                "Unknown auth provider '{other}'. Must be one of: static, profile"
            )),
        }
    }
}
