/// PostgREST error code for "the result contains 0 rows".
pub const NO_ROWS_CODE: &str = "PGRST116";

/// SQLSTATE for a unique-constraint violation. PostgREST forwards it as the
/// error `code` with HTTP 409.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Errors from the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend answered with a structured error.
    #[error("{message} (code {code})")]
    Upstream {
        /// HTTP status when the error came over HTTP.
        status: Option<u16>,
        code: String,
        message: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A table or column name that is not a plain SQL identifier.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// The backend answered with something we could not interpret.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl StoreError {
    /// The "no matching row" error.
    pub fn not_found(message: impl Into<String>) -> Self {
        StoreError::Upstream {
            status: Some(404),
            code: NO_ROWS_CODE.to_string(),
            message: message.into(),
        }
    }

    /// A write that would duplicate a unique column.
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Upstream {
            status: Some(409),
            code: UNIQUE_VIOLATION_CODE.to_string(),
            message: message.into(),
        }
    }

    /// Whether a write was refused because it duplicates a unique column.
    pub fn is_conflict(&self) -> bool {
        match self {
            StoreError::Upstream { code, .. } => code == UNIQUE_VIOLATION_CODE,
            StoreError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// Whether this error means "no matching row" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::Upstream { code, .. } => code == NO_ROWS_CODE,
            StoreError::Database(sqlx::Error::RowNotFound) => true,
            _ => false,
        }
    }
}
