//! Handler for dashboard summary counts.

use ambiental_core::tables::TableType;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireRead;
use crate::response::DataResponse;
use crate::state::AppState;

/// Row count of one table.
#[derive(Debug, Serialize)]
pub struct TableCount {
    pub table: TableType,
    pub display_name: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub tables: Vec<TableCount>,
    pub total: usize,
}

/// GET /api/v1/dashboard/stats
pub async fn stats(
    RequireRead(_user): RequireRead,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let mut tables = Vec::with_capacity(TableType::ALL.len());
    for table in TableType::ALL {
        tables.push(TableCount {
            table,
            display_name: table.display_name(),
            count: state.records.count(table).await?,
        });
    }
    let total = tables.iter().map(|t| t.count).sum();

    Ok(Json(DataResponse {
        data: DashboardStats { tables, total },
    }))
}
