//! Domain models for reservas-service.

pub mod reserva;

pub use reserva::{Reserva, ReservaInput};
