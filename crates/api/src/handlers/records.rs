//! Handlers for the `/records/{table}` resource.
//!
//! Every write is validated against the table's rules before anything is
//! sent to the store; invalid records never leave the process.

use ambiental_core::error::CoreError;
use ambiental_core::field_mapping::merge_changes;
use ambiental_core::prosecution::normalize_prosecution;
use ambiental_core::search::{run_query, Page};
use ambiental_core::tables::TableType;
use ambiental_core::types::Record;
use ambiental_core::validation::{validate_record, ValidationReport};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireDelete, RequireRead, RequireWrite};
use crate::query::RecordListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a `{table}` path segment.
pub(crate) fn parse_table(slug: &str) -> AppResult<TableType> {
    TableType::parse(slug).ok_or_else(|| AppError::Core(CoreError::UnknownTable(slug.to_string())))
}

/// Validate a UI-shape record and rewrite the prosecution flag to its
/// persisted literal.
fn prepare_for_write(table: TableType, mut record: Record) -> AppResult<Record> {
    validate_record(table, &record).into_result()?;
    normalize_prosecution(&mut record)
        .map_err(|e| AppError::Core(CoreError::Validation(vec![e.to_string()])))?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/records/{table}
///
/// Fetch a fresh snapshot, then search, sort and paginate it.
pub async fn list_records(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<RecordListParams>,
) -> AppResult<Json<DataResponse<Page<Record>>>> {
    let table = parse_table(&table)?;

    let rows = match params.case_filter() {
        Some(numero_caso) => state.records.find_by_case(table, numero_caso).await?,
        None => state.records.list(table).await?,
    };

    let page = run_query(
        table,
        &rows,
        &params.query_state(),
        params.sort_spec().as_ref(),
    );

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/records/{table}/{identifier}
///
/// `identifier` is a row id, or for notes a case code.
pub async fn get_record(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
    Path((table, identifier)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Record>>> {
    let table = parse_table(&table)?;
    let record = state
        .records
        .get(table, &identifier)
        .await?
        .ok_or_else(|| CoreError::record_not_found(table, &identifier))?;

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

/// POST /api/v1/records/{table}
///
/// Validate and insert a record. Returns 201 with the stored row.
pub async fn create_record(
    RequireWrite(user): RequireWrite,
    State(state): State<AppState>,
    Path(table): Path<String>,
    Json(input): Json<Record>,
) -> AppResult<impl IntoResponse> {
    let table = parse_table(&table)?;
    let record = prepare_for_write(table, input)?;
    let created = state.records.create(table, &record).await?;

    tracing::info!(
        table = %table,
        id = ?created.get("id"),
        username = %user.username,
        "Record created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/records/{table}/{identifier}
///
/// Merge the edited fields over the current record, validate the result and
/// persist it under the same key.
pub async fn update_record(
    RequireWrite(user): RequireWrite,
    State(state): State<AppState>,
    Path((table, identifier)): Path<(String, String)>,
    Json(changes): Json<Record>,
) -> AppResult<Json<DataResponse<Record>>> {
    let table = parse_table(&table)?;
    let current = state
        .records
        .get(table, &identifier)
        .await?
        .ok_or_else(|| CoreError::record_not_found(table, &identifier))?;

    let merged = prepare_for_write(table, merge_changes(&current, &changes))?;
    let updated = state
        .records
        .update(table, &identifier, &merged)
        .await?
        .ok_or_else(|| CoreError::record_not_found(table, &identifier))?;

    tracing::info!(table = %table, identifier = %identifier, username = %user.username, "Record updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/records/{table}/{identifier}
///
/// Returns 204 No Content.
pub async fn delete_record(
    RequireDelete(user): RequireDelete,
    State(state): State<AppState>,
    Path((table, identifier)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let table = parse_table(&table)?;
    if !state.records.delete(table, &identifier).await? {
        return Err(CoreError::record_not_found(table, &identifier).into());
    }

    tracing::info!(table = %table, identifier = %identifier, username = %user.username, "Record deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Validation preview
// ---------------------------------------------------------------------------

/// POST /api/v1/records/{table}/validate
///
/// Run the table's rules without persisting. Always 200; the report says
/// whether the record is valid.
pub async fn validate(
    _auth: AuthUser,
    Path(table): Path<String>,
    Json(input): Json<Record>,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    let table = parse_table(&table)?;
    Ok(Json(DataResponse {
        data: validate_record(table, &input),
    }))
}
