use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Atividade {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Prova bimestral")]
    pub nome_atividade: String,
    #[schema(example = "Capítulos 1 a 4")]
    pub descricao: String,
    #[schema(example = 30.0)]
    pub peso_porcento: f64,
    #[schema(value_type = String, format = Date, example = "2025-11-05")]
    pub data_entrega: NaiveDate,
    /// Turma in gerenciamento-service.
    #[schema(example = 1)]
    pub turma_id: i64,
    /// Professor in gerenciamento-service.
    #[schema(example = 1)]
    pub professor_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtividadeInput {
    pub nome_atividade: String,
    pub descricao: String,
    pub peso_porcento: f64,
    pub data_entrega: NaiveDate,
    pub turma_id: i64,
    pub professor_id: i64,
}

impl From<Atividade> for AtividadeInput {
    fn from(a: Atividade) -> Self {
        Self {
            nome_atividade: a.nome_atividade,
            descricao: a.descricao,
            peso_porcento: a.peso_porcento,
            data_entrega: a.data_entrega,
            turma_id: a.turma_id,
            professor_id: a.professor_id,
        }
    }
}
