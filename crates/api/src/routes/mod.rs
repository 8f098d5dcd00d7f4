pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod health;
pub mod records;
pub mod tables;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/me                                     current user (requires auth)
///
/// /tables                                      table metadata
///
/// /records/{table}                             list (search/paginate), create
/// /records/{table}/validate                    validation preview (POST)
/// /records/{table}/{identifier}                get, update, delete
///
/// /cases/{numero_caso}                         case detail
///
/// /dashboard/stats                             per-table counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tables", tables::router())
        .nest("/records", records::router())
        .nest("/cases", cases::router())
        .nest("/dashboard", dashboard::router())
}
