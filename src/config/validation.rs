//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles syntactic parsing)
//! - Check value ranges (retry attempts >= 1, timeouts > 0)
//! - Check store URLs carry a scheme the clients understand
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `ApiConfig → Result<(), Vec<ValidationError>>`
//! - Runs before the config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ApiConfig;

/// A single semantic violation, keyed by the offending field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!(
                "not a valid socket address: {:?}",
                config.listener.bind_address
            ),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "listener.request_timeout_secs",
            "must be at least 1",
        ));
    }

    if !config.database.url.starts_with("postgres://")
        && !config.database.url.starts_with("postgresql://")
    {
        errors.push(ValidationError::new(
            "database.url",
            "must start with postgres:// or postgresql://",
        ));
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::new(
            "database.max_connections",
            "must be at least 1",
        ));
    }

    if config.database.acquire_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "database.acquire_timeout_ms",
            "must be at least 1",
        ));
    }

    if config.database.connect_attempts == 0 {
        errors.push(ValidationError::new(
            "database.connect_attempts",
            "must be at least 1",
        ));
    }

    if !config.redis.url.starts_with("redis://") && !config.redis.url.starts_with("rediss://") {
        errors.push(ValidationError::new(
            "redis.url",
            "must start with redis:// or rediss://",
        ));
    }

    if config.redis.connect_attempts == 0 {
        errors.push(ValidationError::new(
            "redis.connect_attempts",
            "must be at least 1",
        ));
    }

    if config.migrations.attempts == 0 {
        errors.push(ValidationError::new(
            "migrations.attempts",
            "must be at least 1",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
