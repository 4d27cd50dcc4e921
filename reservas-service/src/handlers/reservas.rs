use crate::dtos::{CreateReservaRequest, UpdateReservaRequest};
use crate::models::{Reserva, ReservaInput};
use crate::services::record_entity_write;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::{AppError, ErrorResponse};
use service_core::extract::{Path, RequestId, ValidatedJson};

fn reserva_not_found(id: i64) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Reserva with id {} not found", id))
}

#[utoipa::path(
    get,
    path = "/reservas",
    responses(
        (status = 200, description = "All reservas", body = [Reserva])
    ),
    tag = "Reservas"
)]
pub async fn list_reservas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reservas = state.db.list_reservas().await?;
    Ok(Json(reservas))
}

#[utoipa::path(
    get,
    path = "/reservas/{id}",
    params(("id" = i64, Path, description = "Reserva id")),
    responses(
        (status = 200, description = "Reserva found", body = Reserva),
        (status = 404, description = "Reserva not found", body = ErrorResponse)
    ),
    tag = "Reservas"
)]
pub async fn get_reserva(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reserva = state
        .db
        .get_reserva(id)
        .await?
        .ok_or_else(|| reserva_not_found(id))?;
    Ok(Json(reserva))
}

#[utoipa::path(
    post,
    path = "/reservas",
    request_body = CreateReservaRequest,
    responses(
        (status = 201, description = "Reserva created", body = Reserva),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Turma not found in gerenciamento-service", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Reservas"
)]
pub async fn create_reserva(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<CreateReservaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = req.into_input()?;

    state
        .gerenciamento
        .require("turmas", "Turma", input.turma_id, request_id.as_deref())
        .await?;

    let reserva = state.db.create_reserva(&input).await?;
    record_entity_write("reserva", "create");
    Ok((StatusCode::CREATED, Json(reserva)))
}

#[utoipa::path(
    put,
    path = "/reservas/{id}",
    params(("id" = i64, Path, description = "Reserva id")),
    request_body = UpdateReservaRequest,
    responses(
        (status = 200, description = "Reserva updated", body = Reserva),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Reserva or turma not found", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Reservas"
)]
pub async fn update_reserva(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<UpdateReservaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_reserva(id)
        .await?
        .ok_or_else(|| reserva_not_found(id))?;

    let turma_id = req.turma_id;
    let input = req.apply(ReservaInput::from(current))?;

    if let Some(turma_id) = turma_id {
        state
            .gerenciamento
            .require("turmas", "Turma", turma_id, request_id.as_deref())
            .await?;
    }

    let reserva = state
        .db
        .update_reserva(id, &input)
        .await?
        .ok_or_else(|| reserva_not_found(id))?;

    record_entity_write("reserva", "update");
    Ok(Json(reserva))
}

#[utoipa::path(
    delete,
    path = "/reservas/{id}",
    params(("id" = i64, Path, description = "Reserva id")),
    responses(
        (status = 204, description = "Reserva deleted"),
        (status = 404, description = "Reserva not found", body = ErrorResponse)
    ),
    tag = "Reservas"
)]
pub async fn delete_reserva(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_reserva(id).await? {
        return Err(reserva_not_found(id));
    }
    record_entity_write("reserva", "delete");
    Ok(StatusCode::NO_CONTENT)
}
