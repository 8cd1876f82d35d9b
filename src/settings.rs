//! Runtime settings read from the process environment.

use crate::error::ConfigError;
use std::collections::HashMap;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://customers.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Include the failure message in 500 bodies.
    pub expose_error_details: bool,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: 5,
            expose_error_details: true,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS`,
    /// `EXPOSE_ERROR_DETAILS` and `BODY_LIMIT_BYTES`; unset keys keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        if let Some(v) = vars.get("DATABASE_URL") {
            settings.database_url = v.clone();
        }
        if let Some(v) = vars.get("BIND_ADDR") {
            settings.bind_addr = v.clone();
        }
        if let Some(v) = vars.get("DB_MAX_CONNECTIONS") {
            settings.max_connections = parse_number("DB_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = vars.get("EXPOSE_ERROR_DETAILS") {
            settings.expose_error_details = parse_bool("EXPOSE_ERROR_DETAILS", v)?;
        }
        if let Some(v) = vars.get("BODY_LIMIT_BYTES") {
            settings.body_limit_bytes = parse_number("BODY_LIMIT_BYTES", v)?;
        }
        Ok(settings)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
