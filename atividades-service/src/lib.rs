//! Atividades Service - graded activities per class and the grades students
//! get on them.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use service_core::error::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::atividades::list_atividades,
        handlers::atividades::get_atividade,
        handlers::atividades::create_atividade,
        handlers::atividades::update_atividade,
        handlers::atividades::delete_atividade,
        handlers::atividades::list_atividade_notas,
        handlers::notas::list_notas,
        handlers::notas::get_nota,
        handlers::notas::create_nota,
        handlers::notas::update_nota,
        handlers::notas::delete_nota,
    ),
    components(
        schemas(
            models::Atividade,
            models::Nota,
            dtos::CreateAtividadeRequest,
            dtos::UpdateAtividadeRequest,
            dtos::CreateNotaRequest,
            dtos::UpdateNotaRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Atividades", description = "Graded activities, checked against gerenciamento-service"),
        (name = "Notas", description = "Grades per student and activity"),
    )
)]
pub struct ApiDoc;
