use crate::models::AtividadeInput;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::utils::parse_date;
use utoipa::ToSchema;
use validator::Validate;

/// New activity. `nome` is accepted as an alias of `nome_atividade`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAtividadeRequest {
    #[serde(alias = "nome")]
    #[validate(length(min = 1, max = 50, message = "nome_atividade must have 1 to 50 characters"))]
    #[schema(example = "Prova bimestral")]
    pub nome_atividade: String,

    #[validate(length(min = 1, max = 100, message = "descricao must have 1 to 100 characters"))]
    #[schema(example = "Capítulos 1 a 4")]
    pub descricao: String,

    #[validate(range(min = 0.0, max = 100.0, message = "peso_porcento must be between 0 and 100"))]
    #[schema(example = 30.0)]
    pub peso_porcento: f64,

    /// `YYYY-MM-DD`
    #[schema(example = "2025-11-05")]
    pub data_entrega: String,

    #[schema(example = 1)]
    pub turma_id: i64,

    #[schema(example = 1)]
    pub professor_id: i64,
}

impl CreateAtividadeRequest {
    pub fn into_input(self) -> Result<AtividadeInput, AppError> {
        Ok(AtividadeInput {
            data_entrega: parse_date("data_entrega", &self.data_entrega)?,
            nome_atividade: self.nome_atividade,
            descricao: self.descricao,
            peso_porcento: self.peso_porcento,
            turma_id: self.turma_id,
            professor_id: self.professor_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAtividadeRequest {
    #[serde(alias = "nome")]
    #[validate(length(min = 1, max = 50, message = "nome_atividade must have 1 to 50 characters"))]
    pub nome_atividade: Option<String>,

    #[validate(length(min = 1, max = 100, message = "descricao must have 1 to 100 characters"))]
    pub descricao: Option<String>,

    #[validate(range(min = 0.0, max = 100.0, message = "peso_porcento must be between 0 and 100"))]
    pub peso_porcento: Option<f64>,

    pub data_entrega: Option<String>,
    pub turma_id: Option<i64>,
    pub professor_id: Option<i64>,
}

impl UpdateAtividadeRequest {
    /// Overlay the supplied fields on the stored values.
    pub fn apply(self, mut current: AtividadeInput) -> Result<AtividadeInput, AppError> {
        if let Some(nome) = self.nome_atividade {
            current.nome_atividade = nome;
        }
        if let Some(descricao) = self.descricao {
            current.descricao = descricao;
        }
        if let Some(peso) = self.peso_porcento {
            current.peso_porcento = peso;
        }
        if let Some(data) = self.data_entrega.as_deref() {
            current.data_entrega = parse_date("data_entrega", data)?;
        }
        if let Some(turma_id) = self.turma_id {
            current.turma_id = turma_id;
        }
        if let Some(professor_id) = self.professor_id {
            current.professor_id = professor_id;
        }
        Ok(current)
    }
}
