//! Domain models for gerenciamento-service.

pub mod aluno;
pub mod professor;
pub mod turma;

pub use aluno::{compute_media_final, Aluno, AlunoInput};
pub use professor::{Professor, ProfessorInput};
pub use turma::{Turma, TurmaInput};
