mod common;

use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn create_defaults_ativo_and_joins_professor_name() {
    let app = spawn_app().await;
    let professor_id = app.create_professor("Maria Souza").await;

    let response = app
        .post(
            "/turmas",
            &json!({ "descricao": "3º ano B", "professor_id": professor_id }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["descricao"], "3º ano B");
    assert_eq!(body["ativo"], true);
    assert_eq!(body["professor_id"], professor_id);
    assert_eq!(body["professor_nome"], "Maria Souza");
}

#[tokio::test]
async fn unknown_professor_is_not_found_and_nothing_is_stored() {
    let app = spawn_app().await;

    let response = app
        .post("/turmas", &json!({ "descricao": "1º ano A", "professor_id": 77 }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Professor"));

    let list: Value = app.get("/turmas").await.json().await.unwrap();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn update_can_move_turma_to_another_professor() {
    let app = spawn_app().await;
    let ana = app.create_professor("Ana").await;
    let bruno = app.create_professor("Bruno").await;
    let turma_id = app.create_turma("1º ano A", ana).await;

    let response = app
        .put(
            &format!("/turmas/{}", turma_id),
            &json!({ "professor_id": bruno, "ativo": false }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["professor_id"], bruno);
    assert_eq!(body["professor_nome"], "Bruno");
    assert_eq!(body["ativo"], false);
    assert_eq!(body["descricao"], "1º ano A");
}

#[tokio::test]
async fn update_to_unknown_professor_is_not_found() {
    let app = spawn_app().await;
    let ana = app.create_professor("Ana").await;
    let turma_id = app.create_turma("1º ano A", ana).await;

    let response = app
        .put(&format!("/turmas/{}", turma_id), &json!({ "professor_id": 404 }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = app
        .get(&format!("/turmas/{}", turma_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["professor_id"], ana);
}

#[tokio::test]
async fn delete_cascades_to_alunos() {
    let app = spawn_app().await;
    let professor_id = app.create_professor("Ana").await;
    let turma_id = app.create_turma("1º ano A", professor_id).await;
    let other_turma = app.create_turma("1º ano B", professor_id).await;
    let aluno_a = app.create_aluno("Pedro", turma_id).await;
    let aluno_b = app.create_aluno("Lia", turma_id).await;
    let survivor = app.create_aluno("Rui", other_turma).await;

    let response = app.delete(&format!("/turmas/{}", turma_id)).await;
    assert_eq!(response.status().as_u16(), 204);

    for id in [aluno_a, aluno_b] {
        assert_eq!(
            app.get(&format!("/alunos/{}", id)).await.status().as_u16(),
            404
        );
    }
    assert_eq!(
        app.get(&format!("/alunos/{}", survivor)).await.status().as_u16(),
        200
    );
}

#[tokio::test]
async fn lists_alunos_of_a_turma() {
    let app = spawn_app().await;
    let professor_id = app.create_professor("Ana").await;
    let turma_id = app.create_turma("1º ano A", professor_id).await;
    app.create_aluno("Pedro", turma_id).await;
    app.create_aluno("Lia", turma_id).await;

    let response = app.get(&format!("/turmas/{}/alunos", turma_id)).await;
    assert_eq!(response.status().as_u16(), 200);

    let alunos: Vec<Value> = response.json().await.unwrap();
    assert_eq!(alunos.len(), 2);
    assert!(alunos.iter().all(|a| a["turma_descricao"] == "1º ano A"));

    assert_eq!(app.get("/turmas/999/alunos").await.status().as_u16(), 404);
}
