//! Database service for reservas-service.

use crate::models::{Reserva, ReservaInput};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "reservas-service"))]
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_reservas(&self) -> Result<Vec<Reserva>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_reservas"])
            .start_timer();

        let reservas = sqlx::query_as::<_, Reserva>(
            "SELECT id, num_sala, lab, data, turma_id FROM reservas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list reservas: {}", e)))?;

        timer.observe_duration();
        Ok(reservas)
    }

    #[instrument(skip(self))]
    pub async fn get_reserva(&self, id: i64) -> Result<Option<Reserva>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_reserva"])
            .start_timer();

        let reserva = sqlx::query_as::<_, Reserva>(
            "SELECT id, num_sala, lab, data, turma_id FROM reservas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get reserva: {}", e)))?;

        timer.observe_duration();
        Ok(reserva)
    }

    #[instrument(skip(self, input), fields(turma_id = input.turma_id))]
    pub async fn create_reserva(&self, input: &ReservaInput) -> Result<Reserva, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_reserva"])
            .start_timer();

        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            INSERT INTO reservas (num_sala, lab, data, turma_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, num_sala, lab, data, turma_id
            "#,
        )
        .bind(input.num_sala)
        .bind(input.lab)
        .bind(input.data)
        .bind(input.turma_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create reserva: {}", e)))?;

        timer.observe_duration();
        info!(reserva_id = reserva.id, "Reserva created");

        Ok(reserva)
    }

    #[instrument(skip(self, input))]
    pub async fn update_reserva(
        &self,
        id: i64,
        input: &ReservaInput,
    ) -> Result<Option<Reserva>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_reserva"])
            .start_timer();

        let reserva = sqlx::query_as::<_, Reserva>(
            r#"
            UPDATE reservas
            SET num_sala = ?, lab = ?, data = ?, turma_id = ?
            WHERE id = ?
            RETURNING id, num_sala, lab, data, turma_id
            "#,
        )
        .bind(input.num_sala)
        .bind(input.lab)
        .bind(input.data)
        .bind(input.turma_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update reserva: {}", e)))?;

        timer.observe_duration();
        Ok(reserva)
    }

    #[instrument(skip(self))]
    pub async fn delete_reserva(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_reserva"])
            .start_timer();

        let result = sqlx::query("DELETE FROM reservas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete reserva: {}", e)))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }
}
