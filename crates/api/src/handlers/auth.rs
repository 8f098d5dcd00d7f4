//! Handlers for the `/auth` resource (login, current user).

use ambiental_core::error::CoreError;
use ambiental_core::permissions::CapabilitySet;
use ambiental_core::roles::Role;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// The caller's identity and what they may do.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub display_name: Option<String>,
    pub role: Role,
    pub capabilities: CapabilitySet,
}

impl UserInfo {
    fn new(username: String, display_name: Option<String>, role: Role) -> Self {
        Self {
            username,
            display_name,
            role,
            capabilities: CapabilitySet::for_role(role),
        }
    }
}

/// Flatten `validator` errors into their messages, sorted for stable output.
fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with the configured provider and return an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(validation_messages(&e))))?;

    let user = match state.auth.authenticate(&input.username, &input.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(
                provider = state.auth.name(),
                username = %input.username,
                error = %e,
                "Login rejected"
            );
            return Err(e.into());
        }
    };

    let access_token = generate_access_token(&user, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(
        provider = state.auth.name(),
        username = %user.username,
        role = %user.role,
        "Login succeeded"
    );

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo::new(user.username, user.display_name, user.role),
    }))
}

/// GET /api/v1/auth/me
///
/// The caller's identity, role and capability set.
pub async fn me(auth: AuthUser) -> AppResult<Json<DataResponse<UserInfo>>> {
    Ok(Json(DataResponse {
        data: UserInfo::new(auth.username, auth.display_name, auth.role),
    }))
}
