//! Database service for atividades-service.

use crate::models::{Atividade, AtividadeInput, Nota, NotaInput};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SELECT_ATIVIDADE: &str = r#"
    SELECT id, nome_atividade, descricao, peso_porcento, data_entrega, turma_id, professor_id
    FROM atividades
"#;

const SELECT_NOTA: &str = r#"
    SELECT n.id, n.nota, n.aluno_id, n.atividade_id, a.nome_atividade
    FROM notas n
    LEFT JOIN atividades a ON a.id = n.atividade_id
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "atividades-service"))]
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Connecting to SQLite");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
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

    // =========================================================================
    // Atividade Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_atividades(&self) -> Result<Vec<Atividade>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_atividades"])
            .start_timer();

        let atividades = sqlx::query_as::<_, Atividade>(&format!("{} ORDER BY id", SELECT_ATIVIDADE))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to list atividades: {}", e))
            })?;

        timer.observe_duration();
        Ok(atividades)
    }

    #[instrument(skip(self))]
    pub async fn get_atividade(&self, id: i64) -> Result<Option<Atividade>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_atividade"])
            .start_timer();

        let atividade = sqlx::query_as::<_, Atividade>(&format!("{} WHERE id = ?", SELECT_ATIVIDADE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get atividade: {}", e)))?;

        timer.observe_duration();
        Ok(atividade)
    }

    #[instrument(skip(self, input), fields(turma_id = input.turma_id, professor_id = input.professor_id))]
    pub async fn create_atividade(&self, input: &AtividadeInput) -> Result<Atividade, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_atividade"])
            .start_timer();

        let atividade = sqlx::query_as::<_, Atividade>(
            r#"
            INSERT INTO atividades (nome_atividade, descricao, peso_porcento, data_entrega, turma_id, professor_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, nome_atividade, descricao, peso_porcento, data_entrega, turma_id, professor_id
            "#,
        )
        .bind(&input.nome_atividade)
        .bind(&input.descricao)
        .bind(input.peso_porcento)
        .bind(input.data_entrega)
        .bind(input.turma_id)
        .bind(input.professor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create atividade: {}", e)))?;

        timer.observe_duration();
        info!(atividade_id = atividade.id, "Atividade created");

        Ok(atividade)
    }

    #[instrument(skip(self, input))]
    pub async fn update_atividade(
        &self,
        id: i64,
        input: &AtividadeInput,
    ) -> Result<Option<Atividade>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_atividade"])
            .start_timer();

        let atividade = sqlx::query_as::<_, Atividade>(
            r#"
            UPDATE atividades
            SET nome_atividade = ?, descricao = ?, peso_porcento = ?, data_entrega = ?,
                turma_id = ?, professor_id = ?
            WHERE id = ?
            RETURNING id, nome_atividade, descricao, peso_porcento, data_entrega, turma_id, professor_id
            "#,
        )
        .bind(&input.nome_atividade)
        .bind(&input.descricao)
        .bind(input.peso_porcento)
        .bind(input.data_entrega)
        .bind(input.turma_id)
        .bind(input.professor_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update atividade: {}", e)))?;

        timer.observe_duration();
        Ok(atividade)
    }

    /// Delete an atividade together with its notas.
    #[instrument(skip(self))]
    pub async fn delete_atividade(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_atividade"])
            .start_timer();

        let result = sqlx::query("DELETE FROM atividades WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete atividade: {}", e))
            })?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Nota Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_notas(&self) -> Result<Vec<Nota>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_notas"])
            .start_timer();

        let notas = sqlx::query_as::<_, Nota>(&format!("{} ORDER BY n.id", SELECT_NOTA))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list notas: {}", e)))?;

        timer.observe_duration();
        Ok(notas)
    }

    #[instrument(skip(self))]
    pub async fn list_notas_by_atividade(&self, atividade_id: i64) -> Result<Vec<Nota>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_notas_by_atividade"])
            .start_timer();

        let notas = sqlx::query_as::<_, Nota>(&format!(
            "{} WHERE n.atividade_id = ? ORDER BY n.id",
            SELECT_NOTA
        ))
        .bind(atividade_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list notas: {}", e)))?;

        timer.observe_duration();
        Ok(notas)
    }

    #[instrument(skip(self))]
    pub async fn get_nota(&self, id: i64) -> Result<Option<Nota>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_nota"])
            .start_timer();

        let nota = sqlx::query_as::<_, Nota>(&format!("{} WHERE n.id = ?", SELECT_NOTA))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get nota: {}", e)))?;

        timer.observe_duration();
        Ok(nota)
    }

    #[instrument(skip(self, input), fields(aluno_id = input.aluno_id, atividade_id = input.atividade_id))]
    pub async fn create_nota(&self, input: &NotaInput) -> Result<Nota, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_nota"])
            .start_timer();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO notas (nota, aluno_id, atividade_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(input.nota)
        .bind(input.aluno_id)
        .bind(input.atividade_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| nota_write_error(e, "create nota", input.atividade_id))?;

        timer.observe_duration();
        info!(nota_id = id, "Nota created");

        self.get_nota(id).await?.ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Nota {} vanished after insert", id))
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update_nota(&self, id: i64, input: &NotaInput) -> Result<Option<Nota>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_nota"])
            .start_timer();

        let result = sqlx::query(
            "UPDATE notas SET nota = ?, aluno_id = ?, atividade_id = ? WHERE id = ?",
        )
        .bind(input.nota)
        .bind(input.aluno_id)
        .bind(input.atividade_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| nota_write_error(e, "update nota", input.atividade_id))?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_nota(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_nota(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_nota"])
            .start_timer();

        let result = sqlx::query("DELETE FROM notas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete nota: {}", e)))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }
}

/// An atividade deleted between the existence check and the write surfaces as
/// a foreign key violation.
fn nota_write_error(e: sqlx::Error, action: &str, atividade_id: i64) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => AppError::NotFound(
            anyhow::anyhow!("Atividade with id {} not found", atividade_id),
        ),
        _ => AppError::DatabaseError(anyhow::anyhow!("Failed to {}: {}", action, e)),
    }
}
