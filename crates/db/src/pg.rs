//! [`TableStore`] directly on Postgres via sqlx.
//!
//! Rows travel as JSONB: reads use `to_jsonb(t)` and writes go through
//! `jsonb_populate_record`, so one implementation serves every table without
//! per-table structs. Table and column names are checked to be plain
//! lowercase identifiers before they are interpolated.

use ambiental_core::types::Record;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::{Filter, SelectQuery, TableStore};
use crate::DbPool;

/// Quote a table or column name after checking it is a plain identifier.
fn quote_ident(name: &str) -> Result<String, StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid_start && valid_rest && name.len() <= 63 {
        Ok(format!("\"{name}\""))
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

fn where_clause(filters: &[Filter], first_param: usize) -> Result<String, StoreError> {
    if filters.is_empty() {
        return Ok(String::new());
    }
    let conditions = filters
        .iter()
        .enumerate()
        .map(|(i, f)| -> Result<String, StoreError> {
            Ok(format!("t.{}::text = ${}", quote_ident(&f.column)?, first_param + i))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!(" WHERE {}", conditions.join(" AND ")))
}

fn build_select_sql(table: &str, query: &SelectQuery) -> Result<String, StoreError> {
    let mut sql = format!(
        "SELECT to_jsonb(t) FROM {} AS t{}",
        quote_ident(table)?,
        where_clause(&query.filters, 1)?
    );
    if let Some(order) = &query.order {
        let dir = if order.ascending { "ASC" } else { "DESC" };
        sql.push_str(&format!(
            " ORDER BY t.{} {dir} NULLS LAST",
            quote_ident(&order.column)?
        ));
    }
    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = query.offset {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
    Ok(sql)
}

/// Quoted column names of `row`, sorted for stable SQL text.
fn quoted_columns(row: &Record) -> Result<Vec<String>, StoreError> {
    let mut columns = row
        .keys()
        .map(|k| quote_ident(k))
        .collect::<Result<Vec<_>, _>>()?;
    columns.sort();
    Ok(columns)
}

fn build_insert_sql(table: &str, row: &Record) -> Result<String, StoreError> {
    let table = quote_ident(table)?;
    let columns = quoted_columns(row)?;
    if columns.is_empty() {
        return Ok(format!(
            "INSERT INTO {table} AS t DEFAULT VALUES RETURNING to_jsonb(t)"
        ));
    }
    let list = columns.join(", ");
    let source = columns
        .iter()
        .map(|c| format!("r.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "INSERT INTO {table} AS t ({list}) \
         SELECT {source} FROM jsonb_populate_record(NULL::{table}, $1) AS r \
         RETURNING to_jsonb(t)"
    ))
}

fn build_update_sql(table: &str, key: &Filter, changes: &Record) -> Result<String, StoreError> {
    let table = quote_ident(table)?;
    let assignments = quoted_columns(changes)?
        .iter()
        .map(|c| format!("{c} = r.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "UPDATE {table} AS t SET {assignments} \
         FROM jsonb_populate_record(NULL::{table}, $1) AS r{} \
         RETURNING to_jsonb(t)",
        where_clause(std::slice::from_ref(key), 2)?
    ))
}

fn build_delete_sql(table: &str, key: &Filter) -> Result<String, StoreError> {
    Ok(format!(
        "DELETE FROM {} AS t{}",
        quote_ident(table)?,
        where_clause(std::slice::from_ref(key), 1)?
    ))
}

fn into_record(value: Value) -> Result<Record, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("expected a JSON row, got {other}"))),
    }
}

/// Postgres-backed table store.
#[derive(Clone)]
pub struct PgTableStore {
    pool: DbPool,
}

impl PgTableStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TableStore for PgTableStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Record>, StoreError> {
        let sql = build_select_sql(table, query)?;
        let mut q = sqlx::query_scalar::<_, Value>(&sql);
        for filter in &query.filters {
            q = q.bind(&filter.value);
        }
        q.fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(into_record)
            .collect()
    }

    async fn insert(&self, table: &str, row: Record) -> Result<Record, StoreError> {
        let sql = build_insert_sql(table, &row)?;
        let mut q = sqlx::query_scalar::<_, Value>(&sql);
        if !row.is_empty() {
            q = q.bind(Value::Object(row));
        }
        into_record(q.fetch_one(&self.pool).await?)
    }

    async fn update(
        &self,
        table: &str,
        key: &Filter,
        changes: Record,
    ) -> Result<Record, StoreError> {
        if changes.is_empty() {
            let current = self
                .select(table, &SelectQuery::new().filter(key.clone()).limit(1))
                .await?;
            return current
                .into_iter()
                .next()
                .ok_or(StoreError::Database(sqlx::Error::RowNotFound));
        }
        let sql = build_update_sql(table, key, &changes)?;
        let updated = sqlx::query_scalar::<_, Value>(&sql)
            .bind(Value::Object(changes))
            .bind(&key.value)
            .fetch_optional(&self.pool)
            .await?;
        match updated {
            Some(row) => into_record(row),
            None => Err(StoreError::Database(sqlx::Error::RowNotFound)),
        }
    }

    async fn delete(&self, table: &str, key: &Filter) -> Result<(), StoreError> {
        let sql = build_delete_sql(table, key)?;
        let result = sqlx::query(&sql).bind(&key.value).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        Ok(())
    }

    async fn count(&self, table: &str) -> Result<usize, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table)?);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
