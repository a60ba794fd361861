//! Configuration loading from the process environment.

use std::env;

use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build and validate an [`ApiConfig`] from environment variables.
///
/// Recognized keys: `DATABASE_URL`, `REDIS_URL`, `API_PORT`, `APP_ENV`.
/// Anything unset falls back to the schema defaults, which point at local
/// development services.
pub fn load_from_env() -> Result<ApiConfig, ConfigError> {
    let mut config = ApiConfig::default();

    if let Ok(port) = env::var("API_PORT") {
        let port: u16 = port.parse().map_err(|_| ConfigError::Invalid {
            key: "API_PORT",
            message: format!("not a valid port number: {port:?}"),
        })?;
        config.listener.bind_address = format!("0.0.0.0:{port}");
    }

    if let Ok(url) = env::var("DATABASE_URL") {
        config.database.url = url;
    }

    if let Ok(url) = env::var("REDIS_URL") {
        config.redis.url = url;
    }

    if let Ok(environment) = env::var("APP_ENV") {
        config.environment = environment;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so these tests exercise the
    // default path and the error formatting rather than mutating the
    // environment under a multi-threaded test runner.

    #[test]
    fn defaults_pass_validation() {
        let config = ApiConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn validation_errors_are_joined_in_the_message() {
        let errors = vec![
            ValidationError::new("database.url", "must start with postgres://"),
            ValidationError::new("redis.url", "must start with redis://"),
        ];
        let message = ConfigError::Validation(errors).to_string();
        assert!(message.contains("database.url"));
        assert!(message.contains("redis.url"));
    }
}
