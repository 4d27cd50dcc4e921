use crate::dtos::{CreateAlunoRequest, UpdateAlunoRequest};
use crate::handlers::not_found;
use crate::models::{Aluno, AlunoInput};
use crate::services::record_entity_write;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::{AppError, ErrorResponse};
use service_core::extract::{Path, ValidatedJson};

async fn require_turma(state: &AppState, turma_id: i64) -> Result<(), AppError> {
    match state.db.get_turma(turma_id).await? {
        Some(_) => Ok(()),
        None => Err(not_found("Turma", turma_id)),
    }
}

#[utoipa::path(
    get,
    path = "/alunos",
    responses(
        (status = 200, description = "All alunos", body = [Aluno])
    ),
    tag = "Alunos"
)]
pub async fn list_alunos(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let alunos = state.db.list_alunos().await?;
    Ok(Json(alunos))
}

#[utoipa::path(
    get,
    path = "/alunos/{id}",
    params(("id" = i64, Path, description = "Aluno id")),
    responses(
        (status = 200, description = "Aluno found", body = Aluno),
        (status = 404, description = "Aluno not found", body = ErrorResponse)
    ),
    tag = "Alunos"
)]
pub async fn get_aluno(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let aluno = state
        .db
        .get_aluno(id)
        .await?
        .ok_or_else(|| not_found("Aluno", id))?;
    Ok(Json(aluno))
}

#[utoipa::path(
    post,
    path = "/alunos",
    request_body = CreateAlunoRequest,
    responses(
        (status = 201, description = "Aluno created; media_final derived from both grades", body = Aluno),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Turma not found", body = ErrorResponse)
    ),
    tag = "Alunos"
)]
pub async fn create_aluno(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAlunoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = req.into_input()?;
    require_turma(&state, input.turma_id).await?;

    let aluno = state.db.create_aluno(&input).await?;
    record_entity_write("aluno", "create");
    Ok((StatusCode::CREATED, Json(aluno)))
}

#[utoipa::path(
    put,
    path = "/alunos/{id}",
    params(("id" = i64, Path, description = "Aluno id")),
    request_body = UpdateAlunoRequest,
    responses(
        (status = 200, description = "Aluno updated; media_final recomputed", body = Aluno),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Aluno or turma not found", body = ErrorResponse)
    ),
    tag = "Alunos"
)]
pub async fn update_aluno(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateAlunoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_aluno(id)
        .await?
        .ok_or_else(|| not_found("Aluno", id))?;

    if let Some(turma_id) = req.turma_id {
        require_turma(&state, turma_id).await?;
    }

    let input = req.apply(AlunoInput::from(current))?;
    let aluno = state
        .db
        .update_aluno(id, &input)
        .await?
        .ok_or_else(|| not_found("Aluno", id))?;

    record_entity_write("aluno", "update");
    Ok(Json(aluno))
}

#[utoipa::path(
    delete,
    path = "/alunos/{id}",
    params(("id" = i64, Path, description = "Aluno id")),
    responses(
        (status = 204, description = "Aluno deleted"),
        (status = 404, description = "Aluno not found", body = ErrorResponse)
    ),
    tag = "Alunos"
)]
pub async fn delete_aluno(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_aluno(id).await? {
        return Err(not_found("Aluno", id));
    }
    record_entity_write("aluno", "delete");
    Ok(StatusCode::NO_CONTENT)
}
