//! [`AuthProvider`] implementations.
//!
//! - [`StaticCredentialProvider`] -- a fixed credential list from configuration.
//! - [`ProfileProvider`] -- rows of the backend `profiles` table.

use std::sync::Arc;

use ambiental_core::auth::{AuthProvider, AuthStrategy, AuthenticatedUser, INVALID_CREDENTIALS};
use ambiental_core::error::CoreError;
use ambiental_core::roles::{resolve_role, Role};
use ambiental_db::repositories::ProfileRepo;
use async_trait::async_trait;

use super::password::verify_password;

fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized(INVALID_CREDENTIALS.into())
}

/// Check `password` against a PHC hash, treating a malformed hash as an
/// internal fault rather than a bad login.
fn check_password(password: &str, hash: &str) -> Result<(), CoreError> {
    match verify_password(password, hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(invalid_credentials()),
        Err(e) => Err(CoreError::Internal(format!("Password verification error: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Static credentials
// ---------------------------------------------------------------------------

/// One configured login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredential {
    pub username: String,
    pub role: Role,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Parse `AUTH_STATIC_USERS`: `username:role:phc_hash` entries separated by
/// `;`. Blank entries are skipped.
pub fn parse_static_users(raw: &str) -> Result<Vec<StaticCredential>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(user), Some(role), Some(hash)) if !user.trim().is_empty() => {
                    Ok(StaticCredential {
                        username: user.trim().to_string(),
                        role: resolve_role(Some(role)),
                        password_hash: hash.trim().to_string(),
                    })
                }
                _ => Err(format!(
                    "Invalid AUTH_STATIC_USERS entry '{entry}'. Expected username:role:hash"
                )),
            }
        })
        .collect()
}

/// Authenticates against a credential list supplied by configuration.
pub struct StaticCredentialProvider {
    credentials: Vec<StaticCredential>,
}

impl StaticCredentialProvider {
    pub fn new(credentials: Vec<StaticCredential>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl AuthProvider for StaticCredentialProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, CoreError> {
        let username = username.trim();
        let credential = self
            .credentials
            .iter()
            .find(|c| c.username.eq_ignore_ascii_case(username))
            .ok_or_else(invalid_credentials)?;

        check_password(password, &credential.password_hash)?;

        Ok(AuthenticatedUser {
            username: credential.username.clone(),
            display_name: None,
            role: credential.role,
        })
    }
}

// ---------------------------------------------------------------------------
// Profiles table
// ---------------------------------------------------------------------------

/// Authenticates against the `profiles` table, keyed by email.
pub struct ProfileProvider {
    profiles: ProfileRepo,
}

impl ProfileProvider {
    pub fn new(profiles: ProfileRepo) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl AuthProvider for ProfileProvider {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, CoreError> {
        let profile = self
            .profiles
            .find_by_email(username)
            .await
            .map_err(|e| CoreError::Internal(format!("Profile lookup failed: {e}")))?
            .ok_or_else(invalid_credentials)?;

        let hash = profile
            .password_hash
            .as_deref()
            .ok_or_else(invalid_credentials)?;
        check_password(password, hash)?;

        if !profile.activo {
            return Err(CoreError::Forbidden("La cuenta está desactivada".into()));
        }

        Ok(AuthenticatedUser {
            username: profile.email,
            display_name: profile.nombre,
            role: resolve_role(profile.role.as_deref()),
        })
    }
}

/// Build the provider selected by `strategy`.
pub fn build_provider(
    strategy: AuthStrategy,
    static_users: &str,
    profiles: ProfileRepo,
) -> Result<Arc<dyn AuthProvider>, String> {
    let provider: Arc<dyn AuthProvider> = match strategy {
        AuthStrategy::Static => {
            let credentials = parse_static_users(static_users)?;
            if credentials.is_empty() {
                tracing::warn!("AUTH_PROVIDER=static with no AUTH_STATIC_USERS; every login will fail");
            }
            Arc::new(StaticCredentialProvider::new(credentials))
        }
        AuthStrategy::Profile => Arc::new(ProfileProvider::new(profiles)),
    };
    Ok(provider)
}
