use crate::models::TurmaInput;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

fn default_ativo() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTurmaRequest {
    #[validate(length(min = 1, max = 100, message = "descricao must have 1 to 100 characters"))]
    #[schema(example = "3º ano B")]
    pub descricao: String,

    #[serde(default = "default_ativo")]
    #[schema(default = true)]
    pub ativo: bool,

    #[schema(example = 1)]
    pub professor_id: i64,
}

impl From<CreateTurmaRequest> for TurmaInput {
    fn from(req: CreateTurmaRequest) -> Self {
        Self {
            descricao: req.descricao,
            ativo: req.ativo,
            professor_id: req.professor_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTurmaRequest {
    #[validate(length(min = 1, max = 100, message = "descricao must have 1 to 100 characters"))]
    pub descricao: Option<String>,
    pub ativo: Option<bool>,
    pub professor_id: Option<i64>,
}

impl UpdateTurmaRequest {
    pub fn apply(self, mut current: TurmaInput) -> TurmaInput {
        if let Some(descricao) = self.descricao {
            current.descricao = descricao;
        }
        if let Some(ativo) = self.ativo {
            current.ativo = ativo;
        }
        if let Some(professor_id) = self.professor_id {
            current.professor_id = professor_id;
        }
        current
    }
}
