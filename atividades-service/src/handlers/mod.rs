//! HTTP handlers for atividades-service.

pub mod atividades;
pub mod health;
pub mod notas;

use service_core::error::AppError;

pub(crate) fn not_found(label: &str, id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("{} with id {} not found", label, id))
}
