//! HTTP-level tests for case detail, dashboard counts and table metadata.

mod common;

use std::sync::Arc;

use ambiental_core::roles::Role;
use ambiental_db::memory::MemoryTableStore;
use axum::http::StatusCode;
use common::{body_json, get_auth, record, token_for};
use serde_json::json;

async fn seeded_store() -> Arc<MemoryTableStore> {
    let store = Arc::new(MemoryTableStore::new());
    store
        .seed(
            "notas_informativas",
            vec![record(json!({
                "id": 1, "numerocaso": "CASO-5", "fecha": "2024-04-01", "tipoactividad": "Operativo",
            }))],
        )
        .await;
    store
        .seed(
            "detenidos",
            vec![
                record(json!({ "id": 1, "numerocaso": "CASO-5", "nombre": "Luis", "motivo_detencion": "Pesca ilegal" })),
                record(json!({ "id": 2, "numerocaso": "CASO-5", "nombre": "Marta", "motivo_detencion": "Pesca ilegal" })),
            ],
        )
        .await;
    store
        .seed(
            "incautaciones",
            vec![record(json!({ "id": 1, "numerocaso": "CASO-6", "tipo_incautacion": "Redes", "cantidad": 4 }))],
        )
        .await;
    store
}

#[tokio::test]
async fn case_detail_groups_linked_records() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/cases/CASO-5", &token_for(Role::Viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let detail = &json["data"];
    assert_eq!(detail["numeroCaso"], "CASO-5");
    assert_eq!(detail["nota"]["tipoActividad"], "Operativo");
    assert_eq!(detail["detenidos"].as_array().unwrap().len(), 2);
    assert_eq!(detail["detenidos"][0]["motivoDetencion"], "Pesca ilegal");
    assert_eq!(detail["vehiculos"], json!([]));
    assert_eq!(detail["incautaciones"], json!([]));
}

#[tokio::test]
async fn case_without_rows_returns_friendly_404() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/cases/CASO-404", &token_for(Role::Viewer)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No hay información detallada para el caso CASO-404");
}

#[tokio::test]
async fn dashboard_counts_every_table() {
    let app = common::build_test_app(seeded_store().await);
    let response = get_auth(app, "/api/v1/dashboard/stats", &token_for(Role::User)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stats = &json["data"];
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["tables"][0], json!({ "table": "notas", "display_name": "Notas informativas", "count": 1 }));
    assert_eq!(stats["tables"][1]["count"], 2);
    assert_eq!(stats["tables"][2]["count"], 0);
    assert_eq!(stats["tables"][3]["count"], 1);
}

#[tokio::test]
async fn tables_endpoint_describes_forms() {
    let app = common::build_test_app(Arc::new(MemoryTableStore::new()));
    let response = get_auth(app, "/api/v1/tables", &token_for(Role::Viewer)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["search_debounce_ms"], 300);
    assert_eq!(data["tables"].as_array().unwrap().len(), 4);

    let notas = &data["tables"][0];
    assert_eq!(notas["slug"], "notas");
    assert_eq!(notas["table_name"], "notas_informativas");
    assert_eq!(
        notas["required_fields"],
        json!(["numeroCaso", "fecha", "tipoActividad"])
    );
    assert_eq!(notas["labels"][0], json!({ "field": "numeroCaso", "label": "Número de caso" }));
}
