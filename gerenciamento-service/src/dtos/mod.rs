//! Request bodies for gerenciamento-service.
//!
//! Create requests carry every required column; update requests make every
//! field optional and only overwrite what the client sent.

pub mod aluno;
pub mod professor;
pub mod turma;

pub use aluno::{CreateAlunoRequest, UpdateAlunoRequest};
pub use professor::{CreateProfessorRequest, UpdateProfessorRequest};
pub use turma::{CreateTurmaRequest, UpdateTurmaRequest};
