//! Row keying rule for updates and deletes.
//!
//! Rows are addressed by `id`, except in the notes table where an
//! identifier that looks like a generated case code (`CASO-1`,
//! `NI-2024-0003`) addresses the row by its case number instead.

use crate::tables::{TableType, COLUMN_CASE_NUMBER, FIELD_ID};

/// The column/value pair that addresses a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    pub column: &'static str,
    pub value: String,
}

/// Whether an identifier is a generated case code rather than a row id.
///
/// Plain non-negative integers are row ids; anything else non-blank is a
/// case code.
pub fn looks_like_case_code(identifier: &str) -> bool {
    let trimmed = identifier.trim();
    !trimmed.is_empty() && !trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Resolve the row key for `identifier` in `table`.
pub fn resolve_row_key(table: TableType, identifier: &str) -> RowKey {
    let value = identifier.trim().to_string();
    if table == TableType::Notas && looks_like_case_code(&value) {
        RowKey {
            column: COLUMN_CASE_NUMBER,
            value,
        }
    } else {
        RowKey {
            column: FIELD_ID,
            value,
        }
    }
}
