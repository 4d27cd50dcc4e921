//! Common test utilities for workflow integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use workflow_tests::WorkflowTestContext;

/// Start all three services with fresh databases.
///
/// This is the main entry point for workflow tests.
pub async fn setup() -> WorkflowTestContext {
    WorkflowTestContext::new()
        .await
        .expect("Failed to start services")
}

/// Start all three services with peer lookups aimed at a closed port.
pub async fn setup_without_gerenciamento() -> WorkflowTestContext {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    WorkflowTestContext::with_gerenciamento_url(&format!("http://127.0.0.1:{}", port))
        .await
        .expect("Failed to start services")
}

/// Ids of a professor, a turma taught by them and an aluno enrolled in it.
pub struct School {
    pub professor_id: i64,
    pub turma_id: i64,
    pub aluno_id: i64,
}

/// Populate gerenciamento-service with one professor, turma and aluno.
pub async fn seed_school(ctx: &WorkflowTestContext) -> School {
    let professor_id = ctx
        .create(
            &ctx.gerenciamento("/professores"),
            &json!({ "nome": "Ana Souza", "idade": 41, "materia": "História" }),
        )
        .await
        .expect("Failed to create professor");

    let turma_id = ctx
        .create(
            &ctx.gerenciamento("/turmas"),
            &json!({ "descricao": "3º ano B", "professor_id": professor_id }),
        )
        .await
        .expect("Failed to create turma");

    let aluno_id = ctx
        .create(
            &ctx.gerenciamento("/alunos"),
            &json!({
                "nome": "Bruno Lima",
                "idade": 16,
                "turma_id": turma_id,
                "data_nascimento": "2009-03-14",
                "nota_primeiro_semestre": 7.0,
                "nota_segundo_semestre": 8.0
            }),
        )
        .await
        .expect("Failed to create aluno");

    School {
        professor_id,
        turma_id,
        aluno_id,
    }
}

pub fn atividade_body(turma_id: i64, professor_id: i64) -> Value {
    json!({
        "nome_atividade": "Seminário",
        "descricao": "Revolução Industrial",
        "peso_porcento": 25.0,
        "data_entrega": "2025-10-20",
        "turma_id": turma_id,
        "professor_id": professor_id
    })
}

pub fn reserva_body(turma_id: i64) -> Value {
    json!({
        "num_sala": 12,
        "lab": true,
        "data": "2025-10-21",
        "turma_id": turma_id
    })
}

pub async fn status_of(response: reqwest::Response) -> u16 {
    response.status().as_u16()
}
