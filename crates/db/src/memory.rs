//! In-process [`TableStore`] for tests and local runs.
//!
//! Each instance owns its own tables, so tests get isolated state by
//! constructing a fresh store. Unique columns mirror the migrations so a
//! duplicate write fails here the same way it fails against Postgres.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use ambiental_core::search::{sort_by_field, SortDirection, SortSpec};
use ambiental_core::tables::{TableType, COLUMN_CASE_NUMBER};
use ambiental_core::types::Record;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{value_text, Filter, SelectQuery, TableStore};

/// Column holding the generated row id.
const ID_COLUMN: &str = "id";

#[derive(Debug)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
    next_id: AtomicI64,
    /// `(table, column)` pairs that may not repeat a value.
    unique: Vec<(&'static str, &'static str)>,
}

fn matches(row: &Record, filter: &Filter) -> bool {
    row.get(&filter.column)
        .and_then(value_text)
        .is_some_and(|text| text == filter.value)
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            unique: vec![(TableType::Notas.meta().table_name, COLUMN_CASE_NUMBER)],
        }
    }

    /// Fail when `row` repeats a unique value held by a row outside `skip`.
    fn check_unique(
        &self,
        table: &str,
        rows: &[Record],
        row: &Record,
        skip: Option<&Filter>,
    ) -> Result<(), StoreError> {
        let columns = self.unique.iter().filter(|(t, _)| *t == table);
        for (_, column) in columns {
            let Some(value) = row.get(*column).and_then(value_text) else {
                continue;
            };
            let clash = rows
                .iter()
                .filter(|other| skip.is_none_or(|key| !matches(other, key)))
                .any(|other| other.get(*column).and_then(value_text).as_ref() == Some(&value));
            if clash {
                return Err(StoreError::conflict(format!(
                    "duplicate {table}.{column} = {value}"
                )));
            }
        }
        Ok(())
    }

    /// Insert rows as-is, bumping the id sequence past any ids they carry.
    pub async fn seed(&self, table: &str, rows: Vec<Record>) {
        for row in &rows {
            if let Some(id) = row.get(ID_COLUMN).and_then(Value::as_i64) {
                self.next_id.fetch_max(id + 1, Ordering::SeqCst);
            }
        }
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }
}

impl Default for MemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            let spec = SortSpec {
                field: order.column.clone(),
                direction: if order.ascending {
                    SortDirection::Asc
                } else {
                    SortDirection::Desc
                },
            };
            sort_by_field(&mut rows, &spec);
        }

        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn insert(&self, table: &str, mut row: Record) -> Result<Record, StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        self.check_unique(table, rows, &row, None)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        row.insert(ID_COLUMN.to_string(), Value::from(id));
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        key: &Filter,
        changes: Record,
    ) -> Result<Record, StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        self.check_unique(table, rows, &changes, Some(key))?;
        let mut first = None;
        for row in rows.iter_mut().filter(|row| matches(row, key)) {
            for (column, value) in &changes {
                row.insert(column.clone(), value.clone());
            }
            if first.is_none() {
                first = Some(row.clone());
            }
        }
        first.ok_or_else(|| {
            StoreError::not_found(format!("No {table} row with {} = {}", key.column, key.value))
        })
    }

    async fn delete(&self, table: &str, key: &Filter) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        let before = rows.len();
        rows.retain(|row| !matches(row, key));
        if rows.len() == before {
            return Err(StoreError::not_found(format!(
                "No {table} row with {} = {}",
                key.column, key.value
            )));
        }
        Ok(())
    }
}
