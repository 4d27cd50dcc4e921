use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Turma {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "3º ano B")]
    pub descricao: String,
    pub ativo: bool,
    #[schema(example = 1)]
    pub professor_id: i64,
    /// Name of the class teacher, joined on read.
    #[schema(example = "Maria Souza")]
    pub professor_nome: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurmaInput {
    pub descricao: String,
    pub ativo: bool,
    pub professor_id: i64,
}

impl From<Turma> for TurmaInput {
    fn from(t: Turma) -> Self {
        Self {
            descricao: t.descricao,
            ativo: t.ativo,
            professor_id: t.professor_id,
        }
    }
}
