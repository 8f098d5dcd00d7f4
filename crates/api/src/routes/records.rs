//! Route definitions for the `/records` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET    /{table}                -> list_records
/// POST   /{table}                -> create_record
/// POST   /{table}/validate       -> validate
/// GET    /{table}/{identifier}   -> get_record
/// PUT    /{table}/{identifier}   -> update_record
/// DELETE /{table}/{identifier}   -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{table}",
            get(records::list_records).post(records::create_record),
        )
        .route("/{table}/validate", post(records::validate))
        .route(
            "/{table}/{identifier}",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
}
