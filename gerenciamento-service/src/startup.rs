//! Application startup and lifecycle management.

use crate::config::GerenciamentoConfig;
use crate::handlers::{alunos, health, professores, turmas};
use crate::services::{init_metrics, Database};
use axum::{routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::with_common_layers;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GerenciamentoConfig,
    pub db: Arc<Database>,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/professores",
            get(professores::list_professores).post(professores::create_professor),
        )
        .route(
            "/professores/:id",
            get(professores::get_professor)
                .put(professores::update_professor)
                .delete(professores::delete_professor),
        )
        .route(
            "/professores/:id/turmas",
            get(professores::list_professor_turmas),
        )
        .route("/turmas", get(turmas::list_turmas).post(turmas::create_turma))
        .route(
            "/turmas/:id",
            get(turmas::get_turma)
                .put(turmas::update_turma)
                .delete(turmas::delete_turma),
        )
        .route("/turmas/:id/alunos", get(turmas::list_turma_alunos))
        .route("/alunos", get(alunos::list_alunos).post(alunos::create_aluno))
        .route(
            "/alunos/:id",
            get(alunos::get_aluno)
                .put(alunos::update_aluno)
                .delete(alunos::delete_aluno),
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
    /// Connect to the database, run migrations and bind the HTTP listener.
    pub async fn build(config: GerenciamentoConfig) -> Result<Self, AppError> {
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

        let state = AppState {
            config: config.clone(),
            db: Arc::new(db),
        };

        let http_addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Gerenciamento service listener bound");

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
            service = "gerenciamento-service",
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
