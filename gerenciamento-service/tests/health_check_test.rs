mod common;

use common::spawn_app;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok_with_a_reachable_database() {
    let app = spawn_app().await;

    let response = app.get("/health").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gerenciamento-service-test");
}

#[tokio::test]
async fn ready_returns_200() {
    let app = spawn_app().await;
    assert_eq!(app.get("/ready").await.status().as_u16(), 200);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .header("x-request-id", "test-req-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "test-req-1");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn metrics_are_exposed_after_traffic() {
    let app = spawn_app().await;
    app.get("/professores").await;

    let body = app.get("/metrics").await.text().await.unwrap();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("gerenciamento_db_query_duration_seconds"));
}

#[tokio::test]
async fn openapi_document_lists_every_collection() {
    let app = spawn_app().await;

    let response = app.get("/.well-known/openapi.json").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    for path in ["/professores", "/turmas/{id}", "/alunos/{id}", "/turmas/{id}/alunos"] {
        assert!(body["paths"][path].is_object(), "missing {}", path);
    }
}
