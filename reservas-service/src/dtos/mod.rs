//! Request bodies for reservas-service.

pub mod reserva;

pub use reserva::{CreateReservaRequest, UpdateReservaRequest};
