use axum::routing::get;
use axum::Router;

use crate::handlers::tables;
use crate::state::AppState;

/// Routes mounted at `/tables`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tables::list_tables))
}
