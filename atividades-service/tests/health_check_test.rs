mod common;

use common::spawn_app;
use serde_json::Value;

#[tokio::test]
async fn health_reports_ok() {
    let app = spawn_app().await;

    let response = app.get("/health").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "atividades-service-test");
}

#[tokio::test]
async fn peer_lookups_are_counted() {
    let app = spawn_app().await;
    app.create_atividade("Prova").await;

    let body = app.get("/metrics").await.text().await.unwrap();
    assert!(body.contains("peer_lookups_total"));
    assert!(body.contains("atividades_entity_writes_total"));
}

#[tokio::test]
async fn request_id_is_forwarded_to_the_peer() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 1, 200).await;
    app.peer_responds("professores", 1, 200).await;

    let response = app
        .client
        .post(format!("{}/atividades", app.address))
        .header("x-request-id", "trace-me")
        .json(&common::atividade_body("Prova", 1, 1))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let requests = app.gerenciamento.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.headers.get("x-request-id").map(|v| v.as_bytes()) == Some(b"trace-me".as_slice())));
}
