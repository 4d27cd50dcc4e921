//! Application startup and lifecycle management.

use crate::config::AtividadesConfig;
use crate::handlers::{atividades, health, notas};
use crate::services::{init_metrics, Database};
use axum::{routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::with_common_layers;
use service_core::peer::PeerClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AtividadesConfig,
    pub db: Arc<Database>,
    pub gerenciamento: PeerClient,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/atividades",
            get(atividades::list_atividades).post(atividades::create_atividade),
        )
        .route(
            "/atividades/:id",
            get(atividades::get_atividade)
                .put(atividades::update_atividade)
                .delete(atividades::delete_atividade),
        )
        .route(
            "/atividades/:id/notas",
            get(atividades::list_atividade_notas),
        )
        .route("/notas", get(notas::list_notas).post(notas::create_nota))
        .route(
            "/notas/:id",
            get(notas::get_nota)
                .put(notas::update_nota)
                .delete(notas::delete_nota),
        );

    let ops = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics_handler))
        .route("/.well-known/openapi.json", get(health::openapi_json));

    with_common_layers(api.merge(ops)).with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Connect to the database, run migrations, prepare the gerenciamento
    /// client and bind the HTTP listener.
    pub async fn build(config: AtividadesConfig) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(&config.database.url, config.database.max_connections)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to SQLite");
                e
            })?;

        db.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;

        let gerenciamento = PeerClient::new(
            "gerenciamento-service",
            &config.gerenciamento.url,
            config.gerenciamento.timeout,
        )?;
        tracing::info!(
            endpoint = %gerenciamento.base_url(),
            timeout_ms = config.gerenciamento.timeout.as_millis() as u64,
            "Peer lookups go to gerenciamento-service"
        );

        let state = AppState {
            config: config.clone(),
            db: Arc::new(db),
            gerenciamento,
        };

        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Atividades service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);

        tracing::info!(
            service = "atividades-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, app).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
