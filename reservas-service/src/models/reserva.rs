use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Reserva {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 12)]
    pub num_sala: i64,
    /// Whether the booked room is a lab.
    pub lab: bool,
    #[schema(value_type = String, format = Date, example = "2025-09-15")]
    pub data: NaiveDate,
    /// Turma in gerenciamento-service.
    #[schema(example = 1)]
    pub turma_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservaInput {
    pub num_sala: i64,
    pub lab: bool,
    pub data: NaiveDate,
    pub turma_id: i64,
}

impl From<Reserva> for ReservaInput {
    fn from(r: Reserva) -> Self {
        Self {
            num_sala: r.num_sala,
            lab: r.lab,
            data: r.data,
            turma_id: r.turma_id,
        }
    }
}
