//! The table store trait and its query types.
//!
//! A store speaks DB shape only: table names are physical table names and
//! keys are column names. Mapping to UI shape happens in the repositories.

use ambiental_core::keys::RowKey;
use ambiental_core::types::Record;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// An equality filter on one column. Values compare as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl From<RowKey> for Filter {
    fn from(key: RowKey) -> Self {
        Filter::eq(key.column, key.value)
    }
}

/// Column ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Parameters for [`TableStore::select`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Render a filter value the way every store compares it.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    ambiental_core::types::value_as_text(value)
}

/// A per-table row store.
///
/// `update` and `delete` return a not-found error (see
/// [`StoreError::is_not_found`]) when no row matches the key.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Record>, StoreError>;

    /// Insert one row and return it as stored (with generated columns).
    async fn insert(&self, table: &str, row: Record) -> Result<Record, StoreError>;

    /// Apply `changes` to the rows matching `key`; returns the first updated row.
    async fn update(
        &self,
        table: &str,
        key: &Filter,
        changes: Record,
    ) -> Result<Record, StoreError>;

    /// Delete the rows matching `key`.
    async fn delete(&self, table: &str, key: &Filter) -> Result<(), StoreError>;

    async fn count(&self, table: &str) -> Result<usize, StoreError> {
        Ok(self.select(table, &SelectQuery::new()).await?.len())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambiental_core::keys::resolve_row_key;
    use ambiental_core::tables::TableType;

    #[test]
    fn builder_collects_parameters() {
        let query = SelectQuery::new()
            .filter(Filter::eq("numerocaso", "CASO-1"))
            .order_by("fecha", false)
            .limit(10)
            .offset(20);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(
            query.order,
            Some(Order {
                column: "fecha".into(),
                ascending: false
            })
        );
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(20));
    }

    #[test]
    fn row_key_becomes_filter() {
        let filter: Filter = resolve_row_key(TableType::Notas, "CASO-9").into();
        assert_eq!(filter, Filter::eq("numerocaso", "CASO-9"));
    }
}
