//! Reservas Service - room and lab bookings for classes.

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
        handlers::reservas::list_reservas,
        handlers::reservas::get_reserva,
        handlers::reservas::create_reserva,
        handlers::reservas::update_reserva,
        handlers::reservas::delete_reserva,
    ),
    components(
        schemas(
            models::Reserva,
            dtos::CreateReservaRequest,
            dtos::UpdateReservaRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Reservas", description = "Room bookings, checked against gerenciamento-service"),
    )
)]
pub struct ApiDoc;
