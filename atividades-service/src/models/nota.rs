use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Nota {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 8.5)]
    pub nota: f64,
    /// Aluno in gerenciamento-service.
    #[schema(example = 1)]
    pub aluno_id: i64,
    #[schema(example = 1)]
    pub atividade_id: i64,
    /// Name of the graded activity, joined on read.
    #[schema(example = "Prova bimestral")]
    pub nome_atividade: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotaInput {
    pub nota: f64,
    pub aluno_id: i64,
    pub atividade_id: i64,
}

impl From<Nota> for NotaInput {
    fn from(n: Nota) -> Self {
        Self {
            nota: n.nota,
            aluno_id: n.aluno_id,
            atividade_id: n.atividade_id,
        }
    }
}
