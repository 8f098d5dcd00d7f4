//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects the request with 403 when
//! the caller's role lacks the capability, so handlers enforce permissions
//! at the type level.

use ambiental_core::error::CoreError;
use ambiental_core::permissions::{has_capability, Capability};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    capability: Capability,
    denied: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !has_capability(user.role, capability) {
        tracing::debug!(username = %user.username, role = %user.role, ?capability, "Permission denied");
        return Err(AppError::Core(CoreError::Forbidden(denied.into())));
    }
    Ok(user)
}

/// Requires [`Capability::Read`].
///
/// ```ignore
/// async fn list(RequireRead(user): RequireRead) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireRead(pub AuthUser);

impl FromRequestParts<AppState> for RequireRead {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require(
            parts,
            state,
            Capability::Read,
            "No tiene permiso para consultar registros",
        )
        .await?;
        Ok(RequireRead(user))
    }
}

/// Requires [`Capability::Write`] (create and update).
pub struct RequireWrite(pub AuthUser);

impl FromRequestParts<AppState> for RequireWrite {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require(
            parts,
            state,
            Capability::Write,
            "No tiene permiso para modificar registros",
        )
        .await?;
        Ok(RequireWrite(user))
    }
}

/// Requires [`Capability::Delete`].
pub struct RequireDelete(pub AuthUser);

impl FromRequestParts<AppState> for RequireDelete {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require(
            parts,
            state,
            Capability::Delete,
            "No tiene permiso para eliminar registros",
        )
        .await?;
        Ok(RequireDelete(user))
    }
}
