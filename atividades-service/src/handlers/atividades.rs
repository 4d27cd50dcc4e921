use crate::dtos::{CreateAtividadeRequest, UpdateAtividadeRequest};
use crate::handlers::not_found;
use crate::models::{Atividade, AtividadeInput, Nota};
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
use service_core::peer::PeerClient;

/// Check the turma and professor an atividade points at.
///
/// Both lookups run concurrently. When both fail, the turma error wins.
/// `None` skips that lookup.
async fn verify_references(
    gerenciamento: &PeerClient,
    turma_id: Option<i64>,
    professor_id: Option<i64>,
    request_id: Option<&str>,
) -> Result<(), AppError> {
    let turma = async {
        match turma_id {
            Some(id) => gerenciamento
                .check_exists("turmas", id, request_id)
                .await
                .into_result(gerenciamento.service_name(), "Turma", id),
            None => Ok(()),
        }
    };
    let professor = async {
        match professor_id {
            Some(id) => gerenciamento
                .check_exists("professores", id, request_id)
                .await
                .into_result(gerenciamento.service_name(), "Professor", id),
            None => Ok(()),
        }
    };

    let (turma, professor) = tokio::join!(turma, professor);
    turma?;
    professor
}

#[utoipa::path(
    get,
    path = "/atividades",
    responses(
        (status = 200, description = "All atividades", body = [Atividade])
    ),
    tag = "Atividades"
)]
pub async fn list_atividades(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let atividades = state.db.list_atividades().await?;
    Ok(Json(atividades))
}

#[utoipa::path(
    get,
    path = "/atividades/{id}",
    params(("id" = i64, Path, description = "Atividade id")),
    responses(
        (status = 200, description = "Atividade found", body = Atividade),
        (status = 404, description = "Atividade not found", body = ErrorResponse)
    ),
    tag = "Atividades"
)]
pub async fn get_atividade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let atividade = state
        .db
        .get_atividade(id)
        .await?
        .ok_or_else(|| not_found("Atividade", id))?;
    Ok(Json(atividade))
}

#[utoipa::path(
    post,
    path = "/atividades",
    request_body = CreateAtividadeRequest,
    responses(
        (status = 201, description = "Atividade created", body = Atividade),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Turma or professor not found in gerenciamento-service", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Atividades"
)]
pub async fn create_atividade(
    State(state): State<AppState>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<CreateAtividadeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let input = req.into_input()?;

    verify_references(
        &state.gerenciamento,
        Some(input.turma_id),
        Some(input.professor_id),
        request_id.as_deref(),
    )
    .await?;

    let atividade = state.db.create_atividade(&input).await?;
    record_entity_write("atividade", "create");
    Ok((StatusCode::CREATED, Json(atividade)))
}

#[utoipa::path(
    put,
    path = "/atividades/{id}",
    params(("id" = i64, Path, description = "Atividade id")),
    request_body = UpdateAtividadeRequest,
    responses(
        (status = 200, description = "Atividade updated", body = Atividade),
        (status = 400, description = "Invalid body or date", body = ErrorResponse),
        (status = 404, description = "Atividade, turma or professor not found", body = ErrorResponse),
        (status = 502, description = "gerenciamento-service unreachable", body = ErrorResponse)
    ),
    tag = "Atividades"
)]
pub async fn update_atividade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    request_id: RequestId,
    ValidatedJson(req): ValidatedJson<UpdateAtividadeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let current = state
        .db
        .get_atividade(id)
        .await?
        .ok_or_else(|| not_found("Atividade", id))?;

    let (turma_id, professor_id) = (req.turma_id, req.professor_id);
    let input = req.apply(AtividadeInput::from(current))?;

    verify_references(
        &state.gerenciamento,
        turma_id,
        professor_id,
        request_id.as_deref(),
    )
    .await?;

    let atividade = state
        .db
        .update_atividade(id, &input)
        .await?
        .ok_or_else(|| not_found("Atividade", id))?;

    record_entity_write("atividade", "update");
    Ok(Json(atividade))
}

#[utoipa::path(
    delete,
    path = "/atividades/{id}",
    params(("id" = i64, Path, description = "Atividade id")),
    responses(
        (status = 204, description = "Atividade and its notas deleted"),
        (status = 404, description = "Atividade not found", body = ErrorResponse)
    ),
    tag = "Atividades"
)]
pub async fn delete_atividade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.db.delete_atividade(id).await? {
        return Err(not_found("Atividade", id));
    }
    record_entity_write("atividade", "delete");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/atividades/{id}/notas",
    params(("id" = i64, Path, description = "Atividade id")),
    responses(
        (status = 200, description = "Notas recorded for the atividade", body = [Nota]),
        (status = 404, description = "Atividade not found", body = ErrorResponse)
    ),
    tag = "Atividades"
)]
pub async fn list_atividade_notas(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.get_atividade(id).await?.is_none() {
        return Err(not_found("Atividade", id));
    }
    let notas = state.db.list_notas_by_atividade(id).await?;
    Ok(Json(notas))
}
