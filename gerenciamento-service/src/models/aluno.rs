use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Aluno {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "João Pereira")]
    pub nome: String,
    #[schema(example = 15)]
    pub idade: Option<i64>,
    #[schema(value_type = Option<String>, format = Date, example = "2009-03-14")]
    pub data_nascimento: Option<NaiveDate>,
    #[schema(example = 7.5)]
    pub nota_primeiro_semestre: Option<f64>,
    #[schema(example = 8.5)]
    pub nota_segundo_semestre: Option<f64>,
    /// Mean of both semester grades; null until both are known.
    #[schema(example = 8.0)]
    pub media_final: Option<f64>,
    #[schema(example = 1)]
    pub turma_id: i64,
    /// Description of the student's class, joined on read.
    #[schema(example = "3º ano B")]
    pub turma_descricao: Option<String>,
}

/// Column values written on insert and update. `media_final` is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct AlunoInput {
    pub nome: String,
    pub idade: Option<i64>,
    pub data_nascimento: Option<NaiveDate>,
    pub nota_primeiro_semestre: Option<f64>,
    pub nota_segundo_semestre: Option<f64>,
    pub turma_id: i64,
}

impl AlunoInput {
    pub fn media_final(&self) -> Option<f64> {
        compute_media_final(self.nota_primeiro_semestre, self.nota_segundo_semestre)
    }
}

impl From<Aluno> for AlunoInput {
    fn from(a: Aluno) -> Self {
        Self {
            nome: a.nome,
            idade: a.idade,
            data_nascimento: a.data_nascimento,
            nota_primeiro_semestre: a.nota_primeiro_semestre,
            nota_segundo_semestre: a.nota_segundo_semestre,
            turma_id: a.turma_id,
        }
    }
}

/// Final average: arithmetic mean of both semester grades, or `None` when
/// either one is missing.
pub fn compute_media_final(primeiro: Option<f64>, segundo: Option<f64>) -> Option<f64> {
    match (primeiro, segundo) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        _ => None,
    }
}
