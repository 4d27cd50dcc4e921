//! Request bodies for atividades-service.

pub mod atividade;
pub mod nota;

pub use atividade::{CreateAtividadeRequest, UpdateAtividadeRequest};
pub use nota::{CreateNotaRequest, UpdateNotaRequest};
