//! Configuration module for reservas-service.

use service_core::config::{self as core_config, env_or, env_parse_or};
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ReservasConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub gerenciamento: PeerServiceConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Where to reach gerenciamento-service for turma lookups.
#[derive(Debug, Clone)]
pub struct PeerServiceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl ReservasConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load("RESERVAS", 5003)?;

        Ok(Self {
            common,
            service_name: env_or("SERVICE_NAME", "reservas-service"),
            log_level: env_or("LOG_LEVEL", "info"),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            database: DatabaseConfig {
                url: env_or("RESERVAS_DATABASE_URL", "sqlite://reservas.db"),
                max_connections: env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            gerenciamento: PeerServiceConfig {
                url: env_or(
                    "GERENCIAMENTO_BASE_URL",
                    &env_or("SERVICO_GERENCIAMENTO_URL", "http://localhost:5001"),
                ),
                timeout: Duration::from_millis(env_parse_or("PEER_TIMEOUT_MS", 3000)?),
            },
        })
    }
}
