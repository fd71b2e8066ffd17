//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every server entry against the server form rules
//! - Check referential integrity (`default_server` names a server)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DashConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::DashConfig;
use crate::server::{FormError, ServerForm};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error("server '{server}': {error}")]
    Server { server: String, error: FormError },

    #[error("duplicate server name '{0}'")]
    DuplicateServer(String),

    #[error("default_server '{0}' does not match any server")]
    UnknownDefault(String),
}

pub fn validate_config(config: &DashConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(config.logging.level.clone()));
    }

    let mut names = HashSet::new();
    for server in &config.servers {
        if let Err(form_errors) = ServerForm::from_server(server).validate() {
            errors.extend(form_errors.into_iter().map(|error| ValidationError::Server {
                server: server.display_name(),
                error,
            }));
        }

        if let Some(name) = &server.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateServer(name.clone()));
            }
        }
    }

    if let Some(default) = &config.default_server {
        if config.server(default).is_none() {
            errors.push(ValidationError::UnknownDefault(default.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
