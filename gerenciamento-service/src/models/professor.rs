use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Professor {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Maria Souza")]
    pub nome: String,
    #[schema(example = 42)]
    pub idade: Option<i64>,
    #[schema(example = "Matemática")]
    pub materia: Option<String>,
    pub observacoes: Option<String>,
}

/// Column values written on insert and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfessorInput {
    pub nome: String,
    pub idade: Option<i64>,
    pub materia: Option<String>,
    pub observacoes: Option<String>,
}

impl From<Professor> for ProfessorInput {
    fn from(p: Professor) -> Self {
        Self {
            nome: p.nome,
            idade: p.idade,
            materia: p.materia,
            observacoes: p.observacoes,
        }
    }
}
