use crate::dtos::{CreateProfessorRequest, UpdateProfessorRequest};
use crate::handlers::not_found;
use crate::models::{Professor, ProfessorInput, Turma};
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

#[utoipa::path(
    get,
    path = "/professores",
    responses(
        (status = 200, description = "All professores", body = [Professor])
    ),
    tag = "Professores"
)]
pub async fn list_professores(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let professores = state.db.list_professores().await?;
    Ok(Json(professores))
}

#[utoipa::path(
    get,
    path = "/professores/{id}",
    params(("id" = i64, Path, description = "Professor id")),
    responses(
        (status = 200, description = "Professor found", body = Professor),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professores"
)]
pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let professor = state
        .db
        .get_professor(id)
        .await?
        .ok_or_else(|| not_found("Professor", id))?;
    Ok(Json(professor))
}

#[utoipa::path(
    post,
    path = "/professores",
    request_body = CreateProfessorRequest,
    responses(
        (status = 201, description = "Professor created", body = Professor),
        (status = 400, description = "Invalid body", body = ErrorResponse)
    ),
    tag = "Professores"
)]
pub async fn create_professor(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateProfessorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = ProfessorInput::from(req);
    let professor = state.db.create_professor(&input).await?;
    record_entity_write("professor", "create");
    Ok((StatusCode::CREATED, Json(professor)))
}

#[utoipa::path(
    put,
    path = "/professores/{id}",
    params(("id" = i64, Path, description = "Professor id")),
    request_body = UpdateProfessorRequest,
    responses(
        (status = 200, description = "Professor updated", body = Professor),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professores"
)]
pub async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateProfessorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_professor(id)
        .await?
        .ok_or_else(|| not_found("Professor", id))?;

    let input = req.apply(ProfessorInput::from(current));
    let professor = state
        .db
        .update_professor(id, &input)
        .await?
        .ok_or_else(|| not_found("Professor", id))?;

    record_entity_write("professor", "update");
    Ok(Json(professor))
}

#[utoipa::path(
    delete,
    path = "/professores/{id}",
    params(("id" = i64, Path, description = "Professor id")),
    responses(
        (status = 204, description = "Professor deleted"),
        (status = 404, description = "Professor not found", body = ErrorResponse),
        (status = 409, description = "Professor still has turmas", body = ErrorResponse)
    ),
    tag = "Professores"
)]
pub async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_professor(id).await? {
        return Err(not_found("Professor", id));
    }
    record_entity_write("professor", "delete");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/professores/{id}/turmas",
    params(("id" = i64, Path, description = "Professor id")),
    responses(
        (status = 200, description = "Turmas taught by the professor", body = [Turma]),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professores"
)]
pub async fn list_professor_turmas(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.get_professor(id).await?.is_none() {
        return Err(not_found("Professor", id));
    }
    let turmas = state.db.list_turmas_by_professor(id).await?;
    Ok(Json(turmas))
}
