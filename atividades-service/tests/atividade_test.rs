mod common;

use common::{atividade_body, id_of, spawn_app, spawn_app_with_unreachable_peer};
use serde_json::{json, Value};

#[tokio::test]
async fn create_with_valid_references_round_trips() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 3, 200).await;
    app.peer_responds("professores", 4, 200).await;

    let response = app.post("/atividades", &atividade_body("Prova", 3, 4)).await;
    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();

    let fetched: Value = app
        .get(&format!("/atividades/{}", created["id"]))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched["nome_atividade"], "Prova");
    assert_eq!(fetched["peso_porcento"], 30.0);
    assert_eq!(fetched["data_entrega"], "2025-11-05");
    assert_eq!(fetched["turma_id"], 3);
    assert_eq!(fetched["professor_id"], 4);
}

#[tokio::test]
async fn nome_is_accepted_as_alias() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 1, 200).await;
    app.peer_responds("professores", 1, 200).await;

    let response = app
        .post(
            "/atividades",
            &json!({
                "nome": "Seminário",
                "descricao": "Em grupo",
                "peso_porcento": 20,
                "data_entrega": "2025-06-01",
                "turma_id": 1,
                "professor_id": 1
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["nome_atividade"], "Seminário");
}

#[tokio::test]
async fn missing_turma_is_not_found_and_nothing_is_stored() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 9, 404).await;
    app.peer_responds("professores", 1, 200).await;

    let response = app.post("/atividades", &atividade_body("Prova", 9, 1)).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Turma with id 9"));

    let list: Value = app.get("/atividades").await.json().await.unwrap();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_professor_is_not_found() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 1, 200).await;
    app.peer_responds("professores", 8, 404).await;

    let response = app.post("/atividades", &atividade_body("Prova", 1, 8)).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Professor with id 8"));
}

#[tokio::test]
async fn turma_failure_is_reported_before_professor_failure() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 9, 404).await;
    app.peer_responds("professores", 8, 404).await;

    let response = app.post("/atividades", &atividade_body("Prova", 9, 8)).await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Turma"));
}

#[tokio::test]
async fn peer_error_is_bad_gateway_and_nothing_is_stored() {
    let app = spawn_app().await;
    app.peer_responds("turmas", 1, 500).await;
    app.peer_responds("professores", 1, 200).await;

    let response = app.post("/atividades", &atividade_body("Prova", 1, 1)).await;
    assert_eq!(response.status().as_u16(), 502);

    let list: Value = app.get("/atividades").await.json().await.unwrap();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unreachable_peer_is_bad_gateway() {
    let app = spawn_app_with_unreachable_peer().await;

    let response = app.post("/atividades", &atividade_body("Prova", 1, 1)).await;
    assert_eq!(response.status().as_u16(), 502);

    let list: Value = app.get("/atividades").await.json().await.unwrap();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_due_date_fails_before_any_lookup() {
    let app = spawn_app().await;
    app.peer_never_called("turmas", 1).await;
    app.peer_never_called("professores", 1).await;

    let mut body = atividade_body("Prova", 1, 1);
    body["data_entrega"] = json!("05/11/2025");

    let response = app.post("/atividades", &body).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn update_only_revalidates_supplied_references() {
    let app = spawn_app().await;
    let id = app.create_atividade("Prova").await;
    app.peer_responds("turmas", 2, 200).await;

    let response = app
        .put(
            &format!("/atividades/{}", id),
            &json!({ "descricao": "Revisada", "turma_id": 2 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["descricao"], "Revisada");
    assert_eq!(body["turma_id"], 2);
    assert_eq!(body["professor_id"], 1);

    let requests = app.gerenciamento.received_requests().await.unwrap();
    let professor_lookups = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/professores/"))
        .count();
    assert_eq!(professor_lookups, 1, "only the create should look up the professor");
}

#[tokio::test]
async fn update_to_missing_turma_leaves_row_unchanged() {
    let app = spawn_app().await;
    let id = app.create_atividade("Prova").await;
    app.peer_responds("turmas", 5, 404).await;

    let response = app
        .put(&format!("/atividades/{}", id), &json!({ "turma_id": 5 }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = app
        .get(&format!("/atividades/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["turma_id"], 1);
}

#[tokio::test]
async fn update_with_failing_peer_leaves_row_unchanged() {
    let app = spawn_app().await;
    let id = app.create_atividade("Prova").await;
    app.peer_responds("professores", 9, 500).await;

    let response = app
        .put(
            &format!("/atividades/{}", id),
            &json!({ "descricao": "Capítulos 5 a 8", "professor_id": 9 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 502);

    let body: Value = app
        .get(&format!("/atividades/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["professor_id"], 1);
    assert_eq!(body["descricao"], "Capítulos 1 a 4");
}

#[tokio::test]
async fn delete_cascades_to_notas() {
    let app = spawn_app().await;
    let atividade_id = app.create_atividade("Prova").await;
    app.peer_responds("alunos", 1, 200).await;

    let response = app
        .post(
            "/notas",
            &json!({ "nota": 7.0, "aluno_id": 1, "atividade_id": atividade_id }),
        )
        .await;
    let nota_id = id_of(response).await;

    let response = app.delete(&format!("/atividades/{}", atividade_id)).await;
    assert_eq!(response.status().as_u16(), 204);

    assert_eq!(
        app.get(&format!("/notas/{}", nota_id)).await.status().as_u16(),
        404
    );
    assert_eq!(
        app.get(&format!("/atividades/{}/notas", atividade_id))
            .await
            .status()
            .as_u16(),
        404
    );
}

#[tokio::test]
async fn unknown_atividade_is_not_found() {
    let app = spawn_app().await;

    assert_eq!(app.get("/atividades/42").await.status().as_u16(), 404);
    assert_eq!(app.delete("/atividades/42").await.status().as_u16(), 404);
    assert_eq!(
        app.put("/atividades/42", &json!({ "descricao": "x" }))
            .await
            .status()
            .as_u16(),
        404
    );
}
