//! Gerenciamento Service - teachers, classes and the students enrolled in them.

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
        handlers::professores::list_professores,
        handlers::professores::get_professor,
        handlers::professores::create_professor,
        handlers::professores::update_professor,
        handlers::professores::delete_professor,
        handlers::professores::list_professor_turmas,
        handlers::turmas::list_turmas,
        handlers::turmas::get_turma,
        handlers::turmas::create_turma,
        handlers::turmas::update_turma,
        handlers::turmas::delete_turma,
        handlers::turmas::list_turma_alunos,
        handlers::alunos::list_alunos,
        handlers::alunos::get_aluno,
        handlers::alunos::create_aluno,
        handlers::alunos::update_aluno,
        handlers::alunos::delete_aluno,
    ),
    components(
        schemas(
            models::Professor,
            models::Turma,
            models::Aluno,
            dtos::CreateProfessorRequest,
            dtos::UpdateProfessorRequest,
            dtos::CreateTurmaRequest,
            dtos::UpdateTurmaRequest,
            dtos::CreateAlunoRequest,
            dtos::UpdateAlunoRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Professores", description = "Teacher records"),
        (name = "Turmas", description = "Classes and their teacher"),
        (name = "Alunos", description = "Students, grades and final average"),
    )
)]
pub struct ApiDoc;
