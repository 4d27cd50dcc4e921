use crate::dtos::{CreateNotaRequest, UpdateNotaRequest};
use crate::handlers::not_found;
use crate::models::{Nota, NotaInput};
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

async fn require_atividade(state: &AppState, atividade_id: i64) -> Result<(), AppError> {
    match state.db.get_atividade(atividade_id).await? {
        Some(_) => Ok(()),
        None => Err(not_found("Atividade", atividade_id)),
    }
}

#[utoipa::path(
    get,
    path = "/notas",
    responses(
        (status = 200, description = "All notas", body = [Nota])
    ),
    tag = "Notas"
)]
pub async fn list_notas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let notas = state.db.list_notas().await?;
    Ok(Json(notas))
}

#[utoipa::path(
    get,
    path = "/notas/{id}",
    params(("id" = i64, Path, description = "Nota id")),
    responses(
        (status = 200, description = "Nota found", body = Nota),
        (status = 404, description = "Nota not found", body = ErrorResponse)
    ),
    tag = "Notas"
)]
pub async fn get_nota(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let nota = state
        .db
        .get_nota(id)
        .await?
        .ok_or_else(|| not_found("Nota", id))?;
    Ok(Json(nota))
}

#[utoipa::path(
    post,
    path = "/notas",
    request_body = CreateNotaRequest,
    responses(
        (status = 201, description = "Nota created", body = Nota),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Atividade not found, or aluno not found in gerenciamento-service", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Notas"
)]
pub async fn create_nota(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<CreateNotaRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_atividade(&state, req.atividade_id).await?;
    state
        .gerenciamento
        .require("alunos", "Aluno", req.aluno_id, request_id.as_deref())
        .await?;

    let nota = state.db.create_nota(&NotaInput::from(req)).await?;
    record_entity_write("nota", "create");
    Ok((StatusCode::CREATED, Json(nota)))
}

#[utoipa::path(
    put,
    path = "/notas/{id}",
    params(("id" = i64, Path, description = "Nota id")),
    request_body = UpdateNotaRequest,
    responses(
        (status = 200, description = "Nota updated", body = Nota),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Nota, atividade or aluno not found", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Notas"
)]
pub async fn update_nota(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<UpdateNotaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_nota(id)
        .await?
        .ok_or_else(|| not_found("Nota", id))?;

    if let Some(atividade_id) = req.atividade_id {
        require_atividade(&state, atividade_id).await?;
    }
    if let Some(aluno_id) = req.aluno_id {
        state
            .gerenciamento
            .require("alunos", "Aluno", aluno_id, request_id.as_deref())
            .await?;
    }

    let input = req.apply(NotaInput::from(current));
    let nota = state
        .db
        .update_nota(id, &input)
        .await?
        .ok_or_else(|| not_found("Nota", id))?;

    record_entity_write("nota", "update");
    Ok(Json(nota))
}

#[utoipa::path(
    delete,
    path = "/notas/{id}",
    params(("id" = i64, Path, description = "Nota id")),
    responses(
        (status = 204, description = "Nota deleted"),
        (status = 404, description = "Nota not found", body = ErrorResponse)
    ),
    tag = "Notas"
)]
pub async fn delete_nota(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_nota(id).await? {
        return Err(not_found("Nota", id));
    }
    record_entity_write("nota", "delete");
    Ok(StatusCode::NO_CONTENT)
}
