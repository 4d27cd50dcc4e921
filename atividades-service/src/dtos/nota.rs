use crate::models::NotaInput;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotaRequest {
    #[validate(range(min = 0.0, max = 10.0, message = "nota must be between 0 and 10"))]
    #[schema(example = 8.5)]
    pub nota: f64,

    #[schema(example = 1)]
    pub aluno_id: i64,

    #[schema(example = 1)]
    pub atividade_id: i64,
}

impl From<CreateNotaRequest> for NotaInput {
    fn from(req: CreateNotaRequest) -> Self {
        Self {
            nota: req.nota,
            aluno_id: req.aluno_id,
            atividade_id: req.atividade_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateNotaRequest {
    #[validate(range(min = 0.0, max = 10.0, message = "nota must be between 0 and 10"))]
    pub nota: Option<f64>,
    pub aluno_id: Option<i64>,
    pub atividade_id: Option<i64>,
}

impl UpdateNotaRequest {
    pub fn apply(self, mut current: NotaInput) -> NotaInput {
        if let Some(nota) = self.nota {
            current.nota = nota;
        }
        if let Some(aluno_id) = self.aluno_id {
            current.aluno_id = aluno_id;
        }
        if let Some(atividade_id) = self.atividade_id {
            current.atividade_id = atividade_id;
        }
        current
    }
}
