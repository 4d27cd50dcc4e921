//! Database service for gerenciamento-service.

use crate::models::{Aluno, AlunoInput, Professor, ProfessorInput, Turma, TurmaInput};
use crate::services::metrics::DB_QUERY_DURATION;
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const SELECT_TURMA: &str = r#"
    SELECT t.id, t.descricao, t.ativo, t.professor_id, p.nome AS professor_nome
    FROM turmas t
    LEFT JOIN professores p ON p.id = t.professor_id
"#;

const SELECT_ALUNO: &str = r#"
    SELECT a.id, a.nome, a.idade, a.data_nascimento, a.nota_primeiro_semestre,
           a.nota_segundo_semestre, a.media_final, a.turma_id, t.descricao AS turma_descricao
    FROM alunos a
    LEFT JOIN turmas t ON t.id = a.turma_id
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

/// Map a failed insert/update, turning a foreign key violation into a 404 on
/// the referenced entity.
fn write_error(e: sqlx::Error, action: &str, referenced: &str, id: i64) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => AppError::NotFound(
            anyhow::anyhow!("{} with id {} not found", referenced, id),
        ),
        _ => AppError::DatabaseError(anyhow::anyhow!("Failed to {}: {}", action, e)),
    }
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "gerenciamento-service"))]
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
    // Professor Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_professores(&self) -> Result<Vec<Professor>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_professores"])
            .start_timer();

        let professores = sqlx::query_as::<_, Professor>(
            "SELECT id, nome, idade, materia, observacoes FROM professores ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list professores: {}", e)))?;

        timer.observe_duration();
        Ok(professores)
    }

    #[instrument(skip(self))]
    pub async fn get_professor(&self, id: i64) -> Result<Option<Professor>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_professor"])
            .start_timer();

        let professor = sqlx::query_as::<_, Professor>(
            "SELECT id, nome, idade, materia, observacoes FROM professores WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get professor: {}", e)))?;

        timer.observe_duration();
        Ok(professor)
    }

    #[instrument(skip(self, input))]
    pub async fn create_professor(&self, input: &ProfessorInput) -> Result<Professor, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_professor"])
            .start_timer();

        let professor = sqlx::query_as::<_, Professor>(
            r#"
            INSERT INTO professores (nome, idade, materia, observacoes)
            VALUES (?, ?, ?, ?)
            RETURNING id, nome, idade, materia, observacoes
            "#,
        )
        .bind(&input.nome)
        .bind(input.idade)
        .bind(&input.materia)
        .bind(&input.observacoes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to create professor: {}", e)))?;

        timer.observe_duration();
        info!(professor_id = professor.id, "Professor created");

        Ok(professor)
    }

    #[instrument(skip(self, input))]
    pub async fn update_professor(
        &self,
        id: i64,
        input: &ProfessorInput,
    ) -> Result<Option<Professor>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_professor"])
            .start_timer();

        let professor = sqlx::query_as::<_, Professor>(
            r#"
            UPDATE professores
            SET nome = ?, idade = ?, materia = ?, observacoes = ?
            WHERE id = ?
            RETURNING id, nome, idade, materia, observacoes
            "#,
        )
        .bind(&input.nome)
        .bind(input.idade)
        .bind(&input.materia)
        .bind(&input.observacoes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to update professor: {}", e)))?;

        timer.observe_duration();
        Ok(professor)
    }

    /// Delete a professor. Refused with `Conflict` while any turma still
    /// references them.
    #[instrument(skip(self))]
    pub async fn delete_professor(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_professor"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let turmas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turmas WHERE professor_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to count turmas: {}", e)))?;

        if turmas > 0 {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "Professor with id {} still teaches {} turma(s)",
                id,
                turmas
            )));
        }

        let result = sqlx::query("DELETE FROM professores WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::Conflict(anyhow::anyhow!(
                        "Professor with id {} is still referenced by a turma",
                        id
                    ))
                }
                _ => AppError::DatabaseError(anyhow::anyhow!("Failed to delete professor: {}", e)),
            })?;

        tx.commit().await.map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Turma Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_turmas(&self) -> Result<Vec<Turma>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_turmas"])
            .start_timer();

        let turmas = sqlx::query_as::<_, Turma>(&format!("{} ORDER BY t.id", SELECT_TURMA))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list turmas: {}", e)))?;

        timer.observe_duration();
        Ok(turmas)
    }

    #[instrument(skip(self))]
    pub async fn list_turmas_by_professor(&self, professor_id: i64) -> Result<Vec<Turma>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_turmas_by_professor"])
            .start_timer();

        let turmas = sqlx::query_as::<_, Turma>(&format!(
            "{} WHERE t.professor_id = ? ORDER BY t.id",
            SELECT_TURMA
        ))
        .bind(professor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list turmas: {}", e)))?;

        timer.observe_duration();
        Ok(turmas)
    }

    #[instrument(skip(self))]
    pub async fn get_turma(&self, id: i64) -> Result<Option<Turma>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_turma"])
            .start_timer();

        let turma = sqlx::query_as::<_, Turma>(&format!("{} WHERE t.id = ?", SELECT_TURMA))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get turma: {}", e)))?;

        timer.observe_duration();
        Ok(turma)
    }

    #[instrument(skip(self, input), fields(professor_id = input.professor_id))]
    pub async fn create_turma(&self, input: &TurmaInput) -> Result<Turma, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_turma"])
            .start_timer();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO turmas (descricao, ativo, professor_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&input.descricao)
        .bind(input.ativo)
        .bind(input.professor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "create turma", "Professor", input.professor_id))?;

        timer.observe_duration();
        info!(turma_id = id, "Turma created");

        self.get_turma(id).await?.ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Turma {} vanished after insert", id))
        })
    }

    #[instrument(skip(self, input), fields(professor_id = input.professor_id))]
    pub async fn update_turma(&self, id: i64, input: &TurmaInput) -> Result<Option<Turma>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_turma"])
            .start_timer();

        let result = sqlx::query(
            "UPDATE turmas SET descricao = ?, ativo = ?, professor_id = ? WHERE id = ?",
        )
        .bind(&input.descricao)
        .bind(input.ativo)
        .bind(input.professor_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "update turma", "Professor", input.professor_id))?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_turma(id).await
    }

    /// Delete a turma together with its alunos.
    #[instrument(skip(self))]
    pub async fn delete_turma(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_turma"])
            .start_timer();

        let result = sqlx::query("DELETE FROM turmas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete turma: {}", e)))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Aluno Operations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_alunos(&self) -> Result<Vec<Aluno>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_alunos"])
            .start_timer();

        let alunos = sqlx::query_as::<_, Aluno>(&format!("{} ORDER BY a.id", SELECT_ALUNO))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list alunos: {}", e)))?;

        timer.observe_duration();
        Ok(alunos)
    }

    #[instrument(skip(self))]
    pub async fn list_alunos_by_turma(&self, turma_id: i64) -> Result<Vec<Aluno>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_alunos_by_turma"])
            .start_timer();

        let alunos = sqlx::query_as::<_, Aluno>(&format!(
            "{} WHERE a.turma_id = ? ORDER BY a.id",
            SELECT_ALUNO
        ))
        .bind(turma_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list alunos: {}", e)))?;

        timer.observe_duration();
        Ok(alunos)
    }

    #[instrument(skip(self))]
    pub async fn get_aluno(&self, id: i64) -> Result<Option<Aluno>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_aluno"])
            .start_timer();

        let aluno = sqlx::query_as::<_, Aluno>(&format!("{} WHERE a.id = ?", SELECT_ALUNO))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get aluno: {}", e)))?;

        timer.observe_duration();
        Ok(aluno)
    }

    #[instrument(skip(self, input), fields(turma_id = input.turma_id))]
    pub async fn create_aluno(&self, input: &AlunoInput) -> Result<Aluno, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_aluno"])
            .start_timer();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO alunos (nome, idade, data_nascimento, nota_primeiro_semestre,
                                nota_segundo_semestre, media_final, turma_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&input.nome)
        .bind(input.idade)
        .bind(input.data_nascimento)
        .bind(input.nota_primeiro_semestre)
        .bind(input.nota_segundo_semestre)
        .bind(input.media_final())
        .bind(input.turma_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "create aluno", "Turma", input.turma_id))?;

        timer.observe_duration();
        info!(aluno_id = id, "Aluno created");

        self.get_aluno(id).await?.ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("Aluno {} vanished after insert", id))
        })
    }

    #[instrument(skip(self, input), fields(turma_id = input.turma_id))]
    pub async fn update_aluno(&self, id: i64, input: &AlunoInput) -> Result<Option<Aluno>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_aluno"])
            .start_timer();

        let result = sqlx::query(
            r#"
            UPDATE alunos
            SET nome = ?, idade = ?, data_nascimento = ?, nota_primeiro_semestre = ?,
                nota_segundo_semestre = ?, media_final = ?, turma_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.nome)
        .bind(input.idade)
        .bind(input.data_nascimento)
        .bind(input.nota_primeiro_semestre)
        .bind(input.nota_segundo_semestre)
        .bind(input.media_final())
        .bind(input.turma_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, "update aluno", "Turma", input.turma_id))?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_aluno(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_aluno(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_aluno"])
            .start_timer();

        let result = sqlx::query("DELETE FROM alunos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete aluno: {}", e)))?;

        timer.observe_duration();
        Ok(result.rows_affected() > 0)
    }
}
