use std::sync::Arc;

use ambiental_core::auth::AuthProvider;
use ambiental_db::repositories::{CaseRepo, RecordRepo};
use ambiental_db::store::TableStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is a thin repository
/// handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Backing table store (used directly for health checks).
    pub store: Arc<dyn TableStore>,
    pub records: RecordRepo,
    pub cases: CaseRepo,
    /// The one credential source selected by configuration.
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn TableStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let records = RecordRepo::new(Arc::clone(&store));
        Self {
            config: Arc::new(config),
            cases: CaseRepo::new(records.clone()),
            records,
            store,
            auth,
        }
    }
}
