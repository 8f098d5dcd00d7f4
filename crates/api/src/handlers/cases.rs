//! Handler for the case detail view.

use ambiental_core::error::CoreError;
use ambiental_db::repositories::CaseDetail;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireRead;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/cases/{numero_caso}
///
/// The note and every linked detainee, vehicle and seizure for one case.
pub async fn get_case(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
    Path(numero_caso): Path<String>,
) -> AppResult<Json<DataResponse<CaseDetail>>> {
    let detail = state
        .cases
        .detail(&numero_caso)
        .await?
        .ok_or_else(|| CoreError::CaseNotFound(numero_caso.trim().to_string()))?;

    Ok(Json(DataResponse { data: detail }))
}
