//! HTTP handlers for reservas-service.

pub mod health;
pub mod reservas;
