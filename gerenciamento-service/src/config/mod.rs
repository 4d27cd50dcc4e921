//! Configuration module for gerenciamento-service.

use service_core::config::{self as core_config, env_or, env_parse_or};
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct GerenciamentoConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl GerenciamentoConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load("GERENCIAMENTO", 5001)?;

        Ok(Self {
            common,
            service_name: env_or("SERVICE_NAME", "gerenciamento-service"),
            log_level: env_or("LOG_LEVEL", "info"),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            database: DatabaseConfig {
                url: env_or("GERENCIAMENTO_DATABASE_URL", "sqlite://gerenciamento.db"),
                max_connections: env_parse_or("DATABASE_MAX_CONNECTIONS", 5)?,
            },
        })
    }
}
