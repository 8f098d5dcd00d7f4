//! Repository for the four case record tables.
//!
//! Translates between UI shape and DB shape at every boundary and applies
//! the row keying rule (`id`, or `numerocaso` for note case codes).

use std::sync::Arc;

use ambiental_core::field_mapping::{
    cleared_columns, to_database_shape, to_database_update, to_ui_shape,
};
use ambiental_core::keys::resolve_row_key;
use ambiental_core::search::{sort_by_field, SortDirection, SortSpec};
use ambiental_core::tables::{TableType, COLUMN_CASE_NUMBER, FIELD_DATE, FIELD_ID};
use ambiental_core::types::Record;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::{Filter, SelectQuery, TableStore};

/// Provides CRUD for case records in UI shape.
#[derive(Clone)]
pub struct RecordRepo {
    store: Arc<dyn TableStore>,
}

impl RecordRepo {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Fetch every record of `table`, newest first.
    pub async fn list(&self, table: TableType) -> Result<Vec<Record>, StoreError> {
        let rows = self.select(table, &SelectQuery::new()).await?;
        Ok(newest_first(rows))
    }

    /// Fetch the records of `table` belonging to one case.
    pub async fn find_by_case(
        &self,
        table: TableType,
        numero_caso: &str,
    ) -> Result<Vec<Record>, StoreError> {
        let query = SelectQuery::new().filter(Filter::eq(COLUMN_CASE_NUMBER, numero_caso));
        let rows = self.select(table, &query).await?;
        Ok(newest_first(rows))
    }

    /// Fetch one record by id (or, for notes, by case code).
    pub async fn get(
        &self,
        table: TableType,
        identifier: &str,
    ) -> Result<Option<Record>, StoreError> {
        let key: Filter = resolve_row_key(table, identifier).into();
        let rows = self
            .select(table, &SelectQuery::new().filter(key).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a UI-shape record and return the stored row in UI shape.
    ///
    /// Any `id` on the input is ignored; the store assigns it.
    pub async fn create(&self, table: TableType, record: &Record) -> Result<Record, StoreError> {
        let mut row = to_database_shape(table, record);
        row.remove(FIELD_ID);
        let stored = self.store.insert(table.table_name(), row).await?;
        tracing::debug!(table = %table, "Record inserted");
        Ok(to_ui_shape(table, &stored))
    }

    /// Persist a merged UI-shape record. Returns `None` when no row matches.
    ///
    /// Fields carried as null, and enum fields carried as `""`, are written
    /// as NULL; fields the record omits are left as stored.
    pub async fn update(
        &self,
        table: TableType,
        identifier: &str,
        record: &Record,
    ) -> Result<Option<Record>, StoreError> {
        let key: Filter = resolve_row_key(table, identifier).into();
        let mut changes = to_database_update(table, record);
        for column in cleared_columns(table, record) {
            changes.insert(column, Value::Null);
        }
        match self.store.update(table.table_name(), &key, changes).await {
            Ok(row) => Ok(Some(to_ui_shape(table, &row))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete by id (or, for notes, by case code). Returns `false` when no
    /// row matched.
    pub async fn delete(&self, table: TableType, identifier: &str) -> Result<bool, StoreError> {
        let key: Filter = resolve_row_key(table, identifier).into();
        match self.store.delete(table.table_name(), &key).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn count(&self, table: TableType) -> Result<usize, StoreError> {
        self.store.count(table.table_name()).await
    }

    async fn select(
        &self,
        table: TableType,
        query: &SelectQuery,
    ) -> Result<Vec<Record>, StoreError> {
        let rows = self.store.select(table.table_name(), query).await?;
        Ok(rows.iter().map(|row| to_ui_shape(table, row)).collect())
    }
}

/// Order by `fecha` descending.
///
/// `fecha` is stored as text in any accepted layout, so it cannot be ordered
/// by the store.
fn newest_first(mut rows: Vec<Record>) -> Vec<Record> {
    let spec = SortSpec {
        field: FIELD_DATE.to_string(),
        direction: SortDirection::Desc,
    };
    sort_by_field(&mut rows, &spec);
    rows
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::memory::MemoryTableStore;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    async fn repo_with_notes() -> (RecordRepo, Arc<MemoryTableStore>) {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(
                "notas_informativas",
                vec![
                    record(json!({
                        "id": 1,
                        "numerocaso": "CASO-1",
                        "fecha": "2024-01-10",
                        "tipoactividad": "Operativo",
                        "procuraduria": "SI",
                    })),
                    record(json!({
                        "id": 2,
                        "numerocaso": "CASO-2",
                        "fecha": "2024-02-10",
                        "tipoactividad": "Inspección",
                        "observaciones": null,
                    })),
                ],
            )
            .await;
        (RecordRepo::new(store.clone()), store)
    }

    #[tokio::test]
    async fn list_returns_ui_shape_newest_first() {
        let (repo, _) = repo_with_notes().await;
        let notes = repo.list(TableType::Notas).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0]["numeroCaso"], json!("CASO-2"));
        assert_eq!(notes[0]["tipoActividad"], json!("Inspección"));
        assert!(!notes[0].contains_key("observaciones"), "nulls are dropped");
    }

    #[tokio::test]
    async fn list_orders_mixed_date_layouts_chronologically() {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(
                "detenidos",
                vec![
                    record(json!({ "id": 1, "numerocaso": "CASO-1", "fecha": "31/01/2023" })),
                    record(json!({ "id": 2, "numerocaso": "CASO-1", "fecha": "2024-12-31" })),
                    record(json!({ "id": 3, "numerocaso": "CASO-1", "fecha": "15-06-2024" })),
                    record(json!({ "id": 4, "numerocaso": "CASO-1", "fecha": "05/01/2025" })),
                    record(json!({ "id": 5, "numerocaso": "CASO-1" })),
                ],
            )
            .await;
        let repo = RecordRepo::new(store);

        let ids = |rows: Vec<Record>| -> Vec<i64> {
            rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
        };
        assert_eq!(ids(repo.list(TableType::Detenidos).await.unwrap()), vec![4, 2, 3, 1, 5]);
        assert_eq!(
            ids(repo.find_by_case(TableType::Detenidos, "CASO-1").await.unwrap()),
            vec![4, 2, 3, 1, 5]
        );
    }

    #[tokio::test]
    async fn create_maps_to_db_shape_and_drops_empty_enums() {
        let (repo, store) = repo_with_notes().await;
        let created = repo
            .create(
                TableType::Notas,
                &record(json!({
                    "id": 999,
                    "numeroCaso": "CASO-3",
                    "tipoActividad": "Operativo",
                    "provinciamunicipio": "",
                })),
            )
            .await
            .unwrap();
        assert_eq!(created["id"], json!(3));
        assert_eq!(created["numeroCaso"], json!("CASO-3"));

        let raw = store
            .select(
                "notas_informativas",
                &SelectQuery::new().filter(Filter::eq("id", "3")),
            )
            .await
            .unwrap();
        assert_eq!(raw[0]["tipoactividad"], json!("Operativo"));
        assert!(!raw[0].contains_key("provinciamunicipio"));
    }

    #[tokio::test]
    async fn notes_are_addressable_by_case_code() {
        let (repo, _) = repo_with_notes().await;
        let by_code = repo.get(TableType::Notas, "CASO-1").await.unwrap().unwrap();
        let by_id = repo.get(TableType::Notas, "1").await.unwrap().unwrap();
        assert_eq!(by_code, by_id);
    }

    #[tokio::test]
    async fn update_by_case_code_excludes_id() {
        let (repo, _) = repo_with_notes().await;
        let updated = repo
            .update(
                TableType::Notas,
                "CASO-2",
                &record(json!({ "id": 50, "resultado": "Archivado" })),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["id"], json!(2));
        assert_eq!(updated["resultado"], json!("Archivado"));
    }

    #[tokio::test]
    async fn blank_fields_clear_stored_values() {
        let (repo, store) = repo_with_notes().await;
        store
            .update(
                "notas_informativas",
                &Filter::eq("id", "1"),
                record(json!({ "region": "Norte" })),
            )
            .await
            .unwrap();

        let updated = repo
            .update(
                TableType::Notas,
                "CASO-1",
                &record(json!({ "procuraduria": null, "region": "" })),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.contains_key("procuraduria"));
        assert!(!updated.contains_key("region"));
        assert_eq!(updated["tipoActividad"], json!("Operativo"));

        let raw = store
            .select("notas_informativas", &SelectQuery::new().filter(Filter::eq("id", "1")))
            .await
            .unwrap();
        assert_eq!(raw[0]["procuraduria"], Value::Null);
        assert_eq!(raw[0]["region"], Value::Null);
    }

    #[tokio::test]
    async fn missing_rows_are_none_not_errors() {
        let (repo, _) = repo_with_notes().await;
        assert!(repo.get(TableType::Notas, "77").await.unwrap().is_none());
        assert!(repo
            .update(TableType::Notas, "CASO-404", &Record::new())
            .await
            .unwrap()
            .is_none());
        assert!(!repo.delete(TableType::Notas, "CASO-404").await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let (repo, _) = repo_with_notes().await;
        assert!(repo.delete(TableType::Notas, "1").await.unwrap());
        assert_eq!(repo.count(TableType::Notas).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_case_filters_other_tables() {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(
                "vehiculos",
                vec![
                    record(json!({ "id": 1, "numerocaso": "CASO-1", "tipo_vehiculo": "Camión" })),
                    record(json!({ "id": 2, "numerocaso": "CASO-2", "tipo_vehiculo": "Moto" })),
                ],
            )
            .await;
        let repo = RecordRepo::new(store);
        let found = repo.find_by_case(TableType::Vehiculos, "CASO-1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["tipoVehiculo"], json!("Camión"));
    }
}
