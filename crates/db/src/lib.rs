//! Persistence boundary for case records.
//!
//! - [`store`] -- the [`TableStore`](store::TableStore) trait and query types.
//! - [`rest`] -- Supabase / PostgREST over HTTP.
//! - [`pg`] -- direct Postgres via sqlx.
//! - [`memory`] -- in-process store for tests and local runs.
//! - [`repositories`] -- record, case and profile repositories built on a store.

pub mod error;
pub mod memory;
pub mod pg;
pub mod repositories;
pub mod rest;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool is usable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
