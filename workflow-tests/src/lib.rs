//! Cross-service workflow integration tests library.
//!
//! Boots Gerenciamento, Atividades and Reservas inside the test process, each
//! on an ephemeral port with its own SQLite file, and points the two dependent
//! services at the live Gerenciamento instance. Existence checks therefore go
//! over real HTTP between real services instead of hitting a mock.
//!
//! ## Usage
//!
//! ```bash
//! cargo test -p workflow-tests
//! ```

use anyhow::{anyhow, Context, Result};
use atividades_service::config::{
    AtividadesConfig, DatabaseConfig as AtividadesDatabase, PeerServiceConfig as AtividadesPeer,
};
use gerenciamento_service::config::{
    DatabaseConfig as GerenciamentoDatabase, GerenciamentoConfig,
};
use reqwest::Response;
use reservas_service::config::{
    DatabaseConfig as ReservasDatabase, PeerServiceConfig as ReservasPeer, ReservasConfig,
};
use serde_json::Value;
use service_core::config::Config as CommonConfig;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tempfile::TempDir;

static INIT: Once = Once::new();

/// Per-lookup timeout the dependent services use against Gerenciamento.
pub const PEER_TIMEOUT: Duration = Duration::from_millis(1500);

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,workflow_tests=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Base URLs of the three running services.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub gerenciamento: String,
    pub atividades: String,
    pub reservas: String,
}

impl ServiceEndpoints {
    /// Health check URLs for all services.
    pub fn health_urls(&self) -> Vec<(&'static str, String)> {
        vec![
            ("gerenciamento", format!("{}/health", self.gerenciamento)),
            ("atividades", format!("{}/health", self.atividades)),
            ("reservas", format!("{}/health", self.reservas)),
        ]
    }
}

/// Three services running in-process, plus an HTTP client to drive them.
///
/// Each context owns its databases, so tests never see each other's rows.
pub struct WorkflowTestContext {
    pub endpoints: ServiceEndpoints,
    pub client: reqwest::Client,
    _data_dir: TempDir,
}

impl WorkflowTestContext {
    /// Start all services with Atividades and Reservas wired to the live
    /// Gerenciamento instance.
    pub async fn new() -> Result<Self> {
        Self::start(None).await
    }

    /// Start all services, but send peer lookups to `gerenciamento_url`
    /// instead of the Gerenciamento instance started here.
    pub async fn with_gerenciamento_url(gerenciamento_url: &str) -> Result<Self> {
        Self::start(Some(gerenciamento_url.to_string())).await
    }

    async fn start(peer_override: Option<String>) -> Result<Self> {
        init_tracing();

        let data_dir = tempfile::tempdir().context("Failed to create database directory")?;

        let gerenciamento = spawn_gerenciamento(data_dir.path()).await?;
        let peer_url = peer_override.unwrap_or_else(|| gerenciamento.clone());

        let atividades = spawn_atividades(data_dir.path(), &peer_url).await?;
        let reservas = spawn_reservas(data_dir.path(), &peer_url).await?;

        let endpoints = ServiceEndpoints {
            gerenciamento,
            atividades,
            reservas,
        };
        wait_for_services(&endpoints, Duration::from_secs(10)).await?;

        Ok(Self {
            endpoints,
            client: reqwest::Client::new(),
            _data_dir: data_dir,
        })
    }

    pub fn gerenciamento(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.gerenciamento, path)
    }

    pub fn atividades(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.atividades, path)
    }

    pub fn reservas(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.reservas, path)
    }

    pub async fn get(&self, url: &str) -> Result<Response> {
        Ok(self.client.get(url).send().await?)
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Response> {
        Ok(self.client.post(url).json(body).send().await?)
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<Response> {
        Ok(self.client.put(url).json(body).send().await?)
    }

    pub async fn delete(&self, url: &str) -> Result<Response> {
        Ok(self.client.delete(url).send().await?)
    }

    /// POST and return the `id` of the created row, failing on any non-201.
    pub async fn create(&self, url: &str, body: &Value) -> Result<i64> {
        let response = self.post(url, body).await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if status != reqwest::StatusCode::CREATED {
            return Err(anyhow!("POST {} returned {}: {}", url, status, payload));
        }

        payload["id"]
            .as_i64()
            .ok_or_else(|| anyhow!("POST {} returned no id: {}", url, payload))
    }
}

fn sqlite_url(dir: &Path, file: &str) -> String {
    format!("sqlite://{}", dir.join(file).display())
}

async fn spawn_gerenciamento(dir: &Path) -> Result<String> {
    let config = GerenciamentoConfig {
        common: CommonConfig { port: 0 },
        service_name: "gerenciamento-service".to_string(),
        log_level: "info".to_string(),
        otlp_endpoint: None,
        database: GerenciamentoDatabase {
            url: sqlite_url(dir, "gerenciamento.db"),
            max_connections: 5,
        },
    };

    let app = gerenciamento_service::startup::Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build gerenciamento-service: {}", e))?;
    let address = format!("http://127.0.0.1:{}", app.http_port());

    tokio::spawn(async move {
        if let Err(e) = app.run_until_stopped().await {
            tracing::error!(error = %e, "gerenciamento-service stopped");
        }
    });

    Ok(address)
}

async fn spawn_atividades(dir: &Path, gerenciamento_url: &str) -> Result<String> {
    let config = AtividadesConfig {
        common: CommonConfig { port: 0 },
        service_name: "atividades-service".to_string(),
        log_level: "info".to_string(),
        otlp_endpoint: None,
        database: AtividadesDatabase {
            url: sqlite_url(dir, "atividades_notas.db"),
            max_connections: 5,
        },
        gerenciamento: AtividadesPeer {
            url: gerenciamento_url.to_string(),
            timeout: PEER_TIMEOUT,
        },
    };

    let app = atividades_service::startup::Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build atividades-service: {}", e))?;
    let address = format!("http://127.0.0.1:{}", app.http_port());

    tokio::spawn(async move {
        if let Err(e) = app.run_until_stopped().await {
            tracing::error!(error = %e, "atividades-service stopped");
        }
    });

    Ok(address)
}

async fn spawn_reservas(dir: &Path, gerenciamento_url: &str) -> Result<String> {
    let config = ReservasConfig {
        common: CommonConfig { port: 0 },
        service_name: "reservas-service".to_string(),
        log_level: "info".to_string(),
        otlp_endpoint: None,
        database: ReservasDatabase {
            url: sqlite_url(dir, "reservas.db"),
            max_connections: 5,
        },
        gerenciamento: ReservasPeer {
            url: gerenciamento_url.to_string(),
            timeout: PEER_TIMEOUT,
        },
    };

    let app = reservas_service::startup::Application::build(config)
        .await
        .map_err(|e| anyhow!("Failed to build reservas-service: {}", e))?;
    let address = format!("http://127.0.0.1:{}", app.http_port());

    tokio::spawn(async move {
        if let Err(e) = app.run_until_stopped().await {
            tracing::error!(error = %e, "reservas-service stopped");
        }
    });

    Ok(address)
}

/// Wait for all services to be healthy.
///
/// Polls health endpoints until all services respond with 200 OK.
/// Times out after the specified duration.
pub async fn wait_for_services(endpoints: &ServiceEndpoints, timeout: Duration) -> Result<()> {
    let health_urls = endpoints.health_urls();
    let client = reqwest::Client::new();
    let start = std::time::Instant::now();

    tracing::info!("Waiting for {} services to be healthy...", health_urls.len());

    loop {
        let mut unhealthy_services = Vec::new();

        for (name, url) in &health_urls {
            match client.get(url).timeout(Duration::from_secs(2)).send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    unhealthy_services.push(format!("{} (status: {})", name, resp.status()));
                }
                Err(e) => {
                    unhealthy_services.push(format!("{} (error: {})", name, e));
                }
            }
        }

        if unhealthy_services.is_empty() {
            tracing::info!("All services are healthy");
            return Ok(());
        }

        if start.elapsed() > timeout {
            return Err(anyhow!(
                "Timeout waiting for services. Unhealthy: {}",
                unhealthy_services.join(", ")
            ));
        }

        tracing::debug!("Waiting for services: {}", unhealthy_services.join(", "));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
