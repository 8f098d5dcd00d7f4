//! JWT-based authentication extractor for Axum handlers.

use ambiental_core::error::CoreError;
use ambiental_core::roles::{resolve_role, Role};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from the `Authorization: Bearer` header.
///
/// The role is re-resolved from the token on every request, so a token
/// carrying an unrecognised role behaves as `guest`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Falta el encabezado Authorization".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Formato de Authorization inválido. Se espera: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Sesión inválida o expirada".into()))
        })?;

        Ok(AuthUser {
            role: resolve_role(Some(&claims.role)),
            username: claims.sub,
            display_name: claims.name,
        })
    }
}
