use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

/// Settings every service shares.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Load common settings.
    ///
    /// Sources, in increasing priority: built-in defaults, an optional
    /// `configuration` file, then `<PREFIX>__PORT` style environment variables.
    pub fn load(prefix: &str, default_port: u16) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .set_default("port", default_port)?
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix(prefix).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Read an environment variable, falling back to `default` when unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Read and parse an environment variable, falling back to `default`.
pub fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: {}", key, val))
        }),
        _ => Ok(default),
    }
}
