//! Case detail assembly: the note plus every linked record, by case number.

use ambiental_core::tables::TableType;
use ambiental_core::types::Record;
use serde::Serialize;

use super::RecordRepo;
use crate::error::StoreError;

/// Everything recorded for one case, in UI shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    pub numero_caso: String,
    pub nota: Option<Record>,
    pub detenidos: Vec<Record>,
    pub vehiculos: Vec<Record>,
    pub incautaciones: Vec<Record>,
}

impl CaseDetail {
    pub fn is_empty(&self) -> bool {
        self.nota.is_none()
            && self.detenidos.is_empty()
            && self.vehiculos.is_empty()
            && self.incautaciones.is_empty()
    }
}

/// Reads a case across the four record tables.
#[derive(Clone)]
pub struct CaseRepo {
    records: RecordRepo,
}

impl CaseRepo {
    pub fn new(records: RecordRepo) -> Self {
        Self { records }
    }

    /// Assemble the detail for `numero_caso`. Returns `None` when no table
    /// holds a row for it.
    pub async fn detail(&self, numero_caso: &str) -> Result<Option<CaseDetail>, StoreError> {
        let numero_caso = numero_caso.trim();
        let (notas, detenidos, vehiculos, incautaciones) = tokio::try_join!(
            self.records.find_by_case(TableType::Notas, numero_caso),
            self.records.find_by_case(TableType::Detenidos, numero_caso),
            self.records.find_by_case(TableType::Vehiculos, numero_caso),
            self.records.find_by_case(TableType::Incautaciones, numero_caso),
        )?;

        let detail = CaseDetail {
            numero_caso: numero_caso.to_string(),
            nota: notas.into_iter().next(),
            detenidos,
            vehiculos,
            incautaciones,
        };
        if detail.is_empty() {
            tracing::debug!(numero_caso, "No rows for case");
            return Ok(None);
        }
        Ok(Some(detail))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use super::*;
    use crate::memory::MemoryTableStore;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    async fn seeded_repo() -> CaseRepo {
        let store = Arc::new(MemoryTableStore::new());
        store
            .seed(
                "notas_informativas",
                vec![record(json!({ "id": 1, "numerocaso": "CASO-7", "fecha": "2024-03-01" }))],
            )
            .await;
        store
            .seed(
                "detenidos",
                vec![
                    record(json!({ "id": 1, "numerocaso": "CASO-7", "nombre": "Luis" })),
                    record(json!({ "id": 2, "numerocaso": "CASO-8", "nombre": "Eva" })),
                ],
            )
            .await;
        store
            .seed(
                "incautaciones",
                vec![record(json!({ "id": 1, "numerocaso": "CASO-8", "tipo_incautacion": "Fauna" }))],
            )
            .await;
        CaseRepo::new(RecordRepo::new(store))
    }

    #[tokio::test]
    async fn detail_collects_linked_rows() {
        let repo = seeded_repo().await;
        let detail = repo.detail("CASO-7").await.unwrap().unwrap();
        assert_eq!(detail.numero_caso, "CASO-7");
        assert_eq!(detail.nota.unwrap()["numeroCaso"], json!("CASO-7"));
        assert_eq!(detail.detenidos.len(), 1);
        assert!(detail.vehiculos.is_empty());
        assert!(detail.incautaciones.is_empty());
    }

    #[tokio::test]
    async fn case_without_note_still_has_detail() {
        let repo = seeded_repo().await;
        let detail = repo.detail("CASO-8").await.unwrap().unwrap();
        assert!(detail.nota.is_none());
        assert_eq!(detail.incautaciones[0]["tipoIncautacion"], json!("Fauna"));
    }

    #[tokio::test]
    async fn unknown_case_is_none() {
        let repo = seeded_repo().await;
        assert!(repo.detail("CASO-404").await.unwrap().is_none());
    }

    #[test]
    fn detail_serializes_with_ui_keys() {
        let detail = CaseDetail {
            numero_caso: "CASO-1".into(),
            nota: None,
            detenidos: vec![],
            vehiculos: vec![],
            incautaciones: vec![],
        };
        let json = serde_json::to_value(detail).unwrap();
        assert_eq!(json["numeroCaso"], json!("CASO-1"));
        assert!(json["nota"].is_null());
    }
}
