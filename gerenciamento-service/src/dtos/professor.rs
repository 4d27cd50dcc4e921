use crate::models::ProfessorInput;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfessorRequest {
    #[validate(length(min = 1, max = 100, message = "nome must have 1 to 100 characters"))]
    #[schema(example = "Maria Souza")]
    pub nome: String,

    #[validate(range(min = 0, max = 150, message = "idade must be between 0 and 150"))]
    #[schema(example = 42)]
    pub idade: Option<i64>,

    #[validate(length(max = 100, message = "materia must have at most 100 characters"))]
    #[schema(example = "Matemática")]
    pub materia: Option<String>,

    pub observacoes: Option<String>,
}

impl From<CreateProfessorRequest> for ProfessorInput {
    fn from(req: CreateProfessorRequest) -> Self {
        Self {
            nome: req.nome,
            idade: req.idade,
            materia: req.materia,
            observacoes: req.observacoes,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfessorRequest {
    #[validate(length(min = 1, max = 100, message = "nome must have 1 to 100 characters"))]
    pub nome: Option<String>,

    #[validate(range(min = 0, max = 150, message = "idade must be between 0 and 150"))]
    pub idade: Option<i64>,

    #[validate(length(max = 100, message = "materia must have at most 100 characters"))]
    pub materia: Option<String>,

    pub observacoes: Option<String>,
}

impl UpdateProfessorRequest {
    /// Overlay the supplied fields on the stored values.
    pub fn apply(self, mut current: ProfessorInput) -> ProfessorInput {
        if let Some(nome) = self.nome {
            current.nome = nome;
        }
        if self.idade.is_some() {
            current.idade = self.idade;
        }
        if self.materia.is_some() {
            current.materia = self.materia;
        }
        if self.observacoes.is_some() {
            current.observacoes = self.observacoes;
        }
        current
    }
}
