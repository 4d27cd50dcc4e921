use crate::dtos::{CreateTurmaRequest, UpdateTurmaRequest};
use crate::handlers::not_found;
use crate::models::{Aluno, Turma, TurmaInput};
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

async fn require_professor(state: &AppState, professor_id: i64) -> Result<(), AppError> {
    match state.db.get_professor(professor_id).await? {
        Some(_) => Ok(()),
        None => Err(not_found("Professor", professor_id)),
    }
}

#[utoipa::path(
    get,
    path = "/turmas",
    responses(
        (status = 200, description = "All turmas", body = [Turma])
    ),
    tag = "Turmas"
)]
pub async fn list_turmas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let turmas = state.db.list_turmas().await?;
    Ok(Json(turmas))
}

#[utoipa::path(
    get,
    path = "/turmas/{id}",
    params(("id" = i64, Path, description = "Turma id")),
    responses(
        (status = 200, description = "Turma found", body = Turma),
        (status = 404, description = "Turma not found", body = ErrorResponse)
    ),
    tag = "Turmas"
)]
pub async fn get_turma(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let turma = state
        .db
        .get_turma(id)
        .await?
        .ok_or_else(|| not_found("Turma", id))?;
    Ok(Json(turma))
}

#[utoipa::path(
    post,
    path = "/turmas",
    request_body = CreateTurmaRequest,
    responses(
        (status = 201, description = "Turma created", body = Turma),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Turmas"
)]
pub async fn create_turma(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTurmaRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_professor(&state, req.professor_id).await?;

    let turma = state.db.create_turma(&TurmaInput::from(req)).await?;
    record_entity_write("turma", "create");
    Ok((StatusCode::CREATED, Json(turma)))
}

#[utoipa::path(
    put,
    path = "/turmas/{id}",
    params(("id" = i64, Path, description = "Turma id")),
    request_body = UpdateTurmaRequest,
    responses(
        (status = 200, description = "Turma updated", body = Turma),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Turma or professor not found", body = ErrorResponse)
    ),
    tag = "Turmas"
)]
pub async fn update_turma(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTurmaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_turma(id)
        .await?
        .ok_or_else(|| not_found("Turma", id))?;

    if let Some(professor_id) = req.professor_id {
        require_professor(&state, professor_id).await?;
    }

    let input = req.apply(TurmaInput::from(current));
    let turma = state
        .db
        .update_turma(id, &input)
        .await?
        .ok_or_else(|| not_found("Turma", id))?;

    record_entity_write("turma", "update");
    Ok(Json(turma))
}

#[utoipa::path(
    delete,
    path = "/turmas/{id}",
    params(("id" = i64, Path, description = "Turma id")),
    responses(
        (status = 204, description = "Turma and its alunos deleted"),
        (status = 404, description = "Turma not found", body = ErrorResponse)
    ),
    tag = "Turmas"
)]
pub async fn delete_turma(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_turma(id).await? {
        return Err(not_found("Turma", id));
    }
    record_entity_write("turma", "delete");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/turmas/{id}/alunos",
    params(("id" = i64, Path, description = "Turma id")),
    responses(
        (status = 200, description = "Alunos enrolled in the turma", body = [Aluno]),
        (status = 404, description = "Turma not found", body = ErrorResponse)
    ),
    tag = "Turmas"
)]
pub async fn list_turma_alunos(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.get_turma(id).await?.is_none() {
        return Err(not_found("Turma", id));
    }
    let alunos = state.db.list_alunos_by_turma(id).await?;
    Ok(Json(alunos))
}
