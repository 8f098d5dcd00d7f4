use axum::routing::get;
use axum::Router;

use crate::handlers::cases;
use crate::state::AppState;

/// Routes mounted at `/cases`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{numero_caso}", get(cases::get_case))
}
