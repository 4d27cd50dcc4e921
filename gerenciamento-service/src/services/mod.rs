//! Services module for gerenciamento-service.

pub mod database;
pub mod metrics;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics, record_entity_write};
