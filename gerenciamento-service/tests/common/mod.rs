//! Common test utilities for gerenciamento-service integration tests.

#![allow(dead_code)]

use gerenciamento_service::config::{DatabaseConfig, GerenciamentoConfig};
use gerenciamento_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,gerenciamento_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn test_config(database_url: String) -> GerenciamentoConfig {
    GerenciamentoConfig {
        common: CommonConfig { port: 0 },
        service_name: "gerenciamento-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
        },
    }
}

/// Running service backed by a throw-away SQLite file.
pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub client: reqwest::Client,
    _db_dir: TempDir,
}

/// Spawn a test application on a random port.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", db_dir.path().join("gerenciamento.db").display());

    let app = Application::build(test_config(database_url))
        .await
        .expect("Failed to build application");

    let http_port = app.http_port();

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", http_port),
        http_port,
        client: reqwest::Client::new(),
        _db_dir: db_dir,
    }
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a professor and return its id.
    pub async fn create_professor(&self, nome: &str) -> i64 {
        let response = self
            .post("/professores", &json!({ "nome": nome, "materia": "Matemática" }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        id_of(response).await
    }

    /// Create a turma taught by `professor_id` and return its id.
    pub async fn create_turma(&self, descricao: &str, professor_id: i64) -> i64 {
        let response = self
            .post(
                "/turmas",
                &json!({ "descricao": descricao, "professor_id": professor_id }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        id_of(response).await
    }

    /// Create an aluno in `turma_id` and return its id.
    pub async fn create_aluno(&self, nome: &str, turma_id: i64) -> i64 {
        let response = self
            .post("/alunos", &json!({ "nome": nome, "turma_id": turma_id }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        id_of(response).await
    }
}

pub async fn id_of(response: reqwest::Response) -> i64 {
    let body: Value = response.json().await.expect("Response was not JSON");
    body["id"].as_i64().expect("Response has no id")
}
