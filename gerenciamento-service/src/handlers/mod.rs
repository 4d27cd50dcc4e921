//! HTTP handlers for gerenciamento-service.

pub mod alunos;
pub mod health;
pub mod professores;
pub mod turmas;

use service_core::error::AppError;

pub(crate) fn not_found(label: &str, id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("{} with id {} not found", label, id))
}
