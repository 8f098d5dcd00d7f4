use ambiental_core::error::CoreError;
use ambiental_db::error::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message shown for any failure talking to the data backend.
pub const UPSTREAM_MESSAGE: &str = "No se pudo comunicar con el servidor de datos";

/// Message shown when a write duplicates a unique column.
pub const CONFLICT_MESSAGE: &str = "Ya existe un registro con ese número de caso";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce consistent JSON bodies:
/// `{ "error", "code" }`, plus `"details"` for validation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Core(CoreError::Validation(details)) = &self {
            let body = json!({
                "error": details.join("; "),
                "code": "VALIDATION_ERROR",
                "details": details,
            });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("No se encontró el registro {id} en {entity}"),
                ),
                CoreError::CaseNotFound(_) => {
                    (StatusCode::NOT_FOUND, "CASE_NOT_FOUND", core.to_string())
                }
                CoreError::UnknownTable(name) => (
                    StatusCode::NOT_FOUND,
                    "UNKNOWN_TABLE",
                    format!("Tabla desconocida: {name}"),
                ),
                CoreError::Validation(details) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    details.join("; "),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Persistence errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Ocurrió un error interno".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - "No matching row" maps to 404 and a unique violation to 409, whichever
///   backend reported it.
/// - Invalid column names map to 400.
/// - Every other failure (HTTP, database, decode) maps to 502; the detail is
///   logged, never returned.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    if err.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Registro no encontrado".to_string(),
        );
    }
    if err.is_conflict() {
        tracing::warn!(error = %err, "Unique constraint violated");
        return (StatusCode::CONFLICT, "CONFLICT", CONFLICT_MESSAGE.to_string());
    }
    match err {
        StoreError::InvalidIdentifier(name) => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            format!("Campo no válido: {name}"),
        ),
        other => {
            tracing::error!(error = %other, "Data backend error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                UPSTREAM_MESSAGE.to_string(),
            )
        }
    }
}
