use crate::tables::TableType;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("No hay información detallada para el caso {0}")]
    CaseNotFound(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found error for a record of the given table.
    pub fn record_not_found(table: TableType, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: table.display_name(),
            id: id.into(),
        }
    }
}
