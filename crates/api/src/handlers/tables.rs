//! Handler exposing table metadata to clients.

use ambiental_core::tables::{TableMeta, TableType};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireRead;
use crate::response::DataResponse;
use crate::state::AppState;

/// One table as clients need it to render lists and forms.
#[derive(Debug, Serialize)]
pub struct TableInfo {
    pub slug: &'static str,
    #[serde(flatten)]
    pub meta: &'static TableMeta,
    /// Label for every editable field, in form order.
    pub labels: Vec<FieldLabel>,
}

#[derive(Debug, Serialize)]
pub struct FieldLabel {
    pub field: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub tables: Vec<TableInfo>,
    /// Quiet period clients should wait after a keystroke before searching.
    pub search_debounce_ms: u64,
}

fn table_info(table: TableType) -> TableInfo {
    let meta = table.meta();
    TableInfo {
        slug: table.slug(),
        meta,
        labels: meta
            .editable_fields
            .iter()
            .copied()
            .map(|field| FieldLabel {
                field,
                label: meta.label(field),
            })
            .collect(),
    }
}

/// GET /api/v1/tables
pub async fn list_tables(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<TablesResponse>>> {
    Ok(Json(DataResponse {
        data: TablesResponse {
            tables: TableType::ALL.into_iter().map(table_info).collect(),
            search_debounce_ms: u64::try_from(state.config.search_debounce.as_millis())
                .unwrap_or(u64::MAX),
        },
    }))
}
