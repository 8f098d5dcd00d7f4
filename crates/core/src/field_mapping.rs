//! Translation between UI-shape and DB-shape records.
//!
//! The UI uses camelCase keys (`numeroCaso`, `tipoActividad`); the database
//! uses lowercase / underscored columns (`numerocaso`, `tipoactividad`).
//! Translation is declarative, driven by each table's `key_map`, and never
//! fails: keys the table does not know about are passed through verbatim so
//! schema drift does not break reads or writes.

use serde_json::Value;

use crate::tables::{is_enum_field, TableType, FIELD_ID};
use crate::types::Record;

/// Resolve the DB column for a UI key.
///
/// Falls back to lower-casing the key when the table has no explicit rename.
pub fn db_key(table: TableType, ui_key: &str) -> String {
    table
        .meta()
        .key_map
        .iter()
        .find(|(ui, _)| *ui == ui_key)
        .map(|(_, db)| (*db).to_string())
        .unwrap_or_else(|| ui_key.to_lowercase())
}

/// Resolve the UI key for a DB column. Unmapped columns pass through.
pub fn ui_key(table: TableType, db_key: &str) -> String {
    table
        .meta()
        .key_map
        .iter()
        .find(|(_, db)| *db == db_key)
        .map(|(ui, _)| (*ui).to_string())
        .unwrap_or_else(|| db_key.to_string())
}

fn is_known_ui_key(table: TableType, key: &str) -> bool {
    key == FIELD_ID || table.meta().editable_fields.contains(&key)
}

/// Translate a UI-shape record into DB shape.
///
/// - Null values are dropped.
/// - Enum columns holding `""` are dropped, never written as empty.
/// - Every other value is copied verbatim (the `"SI"`/`"NO"` prosecution
///   flag stays a string).
pub fn to_database_shape(table: TableType, ui: &Record) -> Record {
    let mut out = Record::new();
    for (key, value) in ui {
        if !is_known_ui_key(table, key) {
            tracing::debug!(table = %table, key = %key, "Passing through unknown field");
        }
        if value.is_null() {
            continue;
        }
        let column = db_key(table, key);
        if is_enum_field(&column) && matches!(value, Value::String(s) if s.is_empty()) {
            continue;
        }
        out.insert(column, value.clone());
    }
    out
}

/// Translate a UI-shape record into the DB shape used for updates.
///
/// Same as [`to_database_shape`] with `id` removed: the row key is never
/// part of an update payload.
pub fn to_database_update(table: TableType, ui: &Record) -> Record {
    let mut out = to_database_shape(table, ui);
    out.remove(FIELD_ID);
    out
}

/// DB columns an update should reset to NULL.
///
/// A field carried as null, or an enum field carried as `""`, means "clear
/// this value"; [`to_database_update`] drops both, so they are listed here.
pub fn cleared_columns(table: TableType, ui: &Record) -> Vec<String> {
    ui.iter()
        .filter(|(key, _)| key.as_str() != FIELD_ID)
        .map(|(key, value)| (db_key(table, key), value))
        .filter(|(column, value)| {
            value.is_null()
                || (is_enum_field(column) && matches!(value, Value::String(s) if s.is_empty()))
        })
        .map(|(column, _)| column)
        .collect()
}

/// Translate a DB-shape record into UI shape. Null values are dropped.
pub fn to_ui_shape(table: TableType, db: &Record) -> Record {
    db.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (ui_key(table, key), value.clone()))
        .collect()
}

/// Overlay edited UI fields onto the current UI-shape record.
///
/// Null edits leave the current value untouched and `id` is never replaced.
pub fn merge_changes(current: &Record, changes: &Record) -> Record {
    let mut merged = current.clone();
    for (key, value) in changes {
        if key == FIELD_ID || value.is_null() {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}
