//! Domain models for atividades-service.

pub mod atividade;
pub mod nota;

pub use atividade::{Atividade, AtividadeInput};
pub use nota::{Nota, NotaInput};
