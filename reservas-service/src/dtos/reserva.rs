use crate::models::ReservaInput;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::utils::parse_date;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservaRequest {
    #[validate(range(min = 1, message = "num_sala must be at least 1"))]
    #[schema(example = 12)]
    pub num_sala: i64,

    #[serde(default)]
    #[schema(default = false)]
    pub lab: bool,

    /// `YYYY-MM-DD`
    #[schema(example = "2025-09-15")]
    pub data: String,

    #[schema(example = 1)]
    pub turma_id: i64,
}

impl CreateReservaRequest {
    pub fn into_input(self) -> Result<ReservaInput, AppError> {
        Ok(ReservaInput {
            data: parse_date("data", &self.data)?,
            num_sala: self.num_sala,
            lab: self.lab,
            turma_id: self.turma_id,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReservaRequest {
    #[validate(range(min = 1, message = "num_sala must be at least 1"))]
    pub num_sala: Option<i64>,
    pub lab: Option<bool>,
    pub data: Option<String>,
    pub turma_id: Option<i64>,
}

impl UpdateReservaRequest {
    /// Overlay the supplied fields on the stored values.
    pub fn apply(self, mut current: ReservaInput) -> Result<ReservaInput, AppError> {
        if let Some(num_sala) = self.num_sala {
            current.num_sala = num_sala;
        }
        if let Some(lab) = self.lab {
            current.lab = lab;
        }
        if let Some(data) = self.data.as_deref() {
            current.data = parse_date("data", data)?;
        }
        if let Some(turma_id) = self.turma_id {
            current.turma_id = turma_id;
        }
        Ok(current)
    }
}
