//! Common test utilities for atividades-service integration tests.
//!
//! gerenciamento-service is replaced by a `wiremock` server; each test mounts
//! the lookups it expects.

#![allow(dead_code)]

use atividades_service::config::{AtividadesConfig, DatabaseConfig, PeerServiceConfig};
use atividades_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,atividades_service=debug,service_core=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn test_config(database_url: String, gerenciamento_url: String) -> AtividadesConfig {
    AtividadesConfig {
        common: CommonConfig { port: 0 },
        service_name: "atividades-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
        },
        gerenciamento: PeerServiceConfig {
            url: gerenciamento_url,
            timeout: Duration::from_millis(500),
        },
    }
}

/// Running service backed by a throw-away SQLite file and a mock peer.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub gerenciamento: MockServer,
    _db_dir: TempDir,
}

/// Spawn a test application wired to a fresh mock gerenciamento-service.
pub async fn spawn_app() -> TestApp {
    let gerenciamento = MockServer::start().await;
    let url = gerenciamento.uri();
    spawn_app_with_peer(gerenciamento, url).await
}

/// Spawn a test application whose peer URL points at a closed port.
pub async fn spawn_app_with_unreachable_peer() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let unused = MockServer::start().await;
    spawn_app_with_peer(unused, format!("http://127.0.0.1:{}", port)).await
}

async fn spawn_app_with_peer(gerenciamento: MockServer, peer_url: String) -> TestApp {
    init_tracing();

    let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}", db_dir.path().join("atividades.db").display());

    let app = Application::build(test_config(database_url, peer_url))
        .await
        .expect("Failed to build application");

    let http_port = app.http_port();

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", http_port),
        client: reqwest::Client::new(),
        gerenciamento,
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

    /// Make the mock peer answer `GET /{resource}/{id}` with `status`.
    pub async fn peer_responds(&self, resource: &str, id: i64, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "id": id })))
            .mount(&self.gerenciamento)
            .await;
    }

    /// Make the mock peer answer `GET /{resource}/{id}` only after `delay`.
    pub async fn peer_delays(&self, resource: &str, id: i64, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.gerenciamento)
            .await;
    }

    /// Fail the test if the peer sees any request for `/{resource}/{id}`.
    pub async fn peer_never_called(&self, resource: &str, id: i64) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", resource, id)))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.gerenciamento)
            .await;
    }

    /// Create an atividade for turma 1 / professor 1 and return its id.
    pub async fn create_atividade(&self, nome: &str) -> i64 {
        self.peer_responds("turmas", 1, 200).await;
        self.peer_responds("professores", 1, 200).await;

        let response = self.post("/atividades", &atividade_body(nome, 1, 1)).await;
        assert_eq!(response.status().as_u16(), 201);
        id_of(response).await
    }
}

pub fn atividade_body(nome: &str, turma_id: i64, professor_id: i64) -> Value {
    json!({
        "nome_atividade": nome,
        "descricao": "Capítulos 1 a 4",
        "peso_porcento": 30.0,
        "data_entrega": "2025-11-05",
        "turma_id": turma_id,
        "professor_id": professor_id
    })
}

pub async fn id_of(response: reqwest::Response) -> i64 {
    let body: Value = response.json().await.expect("Response was not JSON");
    body["id"].as_i64().expect("Response has no id")
}
