//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest line limit that still fits a registration burst.
const MIN_LINE_LENGTH: usize = 64;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("server.network is required")]
    MissingNetworkName,
    #[error("listen.port must be between 1024 and 49151, got {0}")]
    PortOutOfRange(u16),
    #[error("limits.max_line_length must be at least 64, got {0}")]
    LineLengthTooSmall(usize),
    #[error("limits.sendq must be greater than zero")]
    ZeroSendq,
    #[error("limits.topic_length must be greater than zero")]
    ZeroTopicLength,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if config.server.name.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(config.server.name.clone()));
    }
    if config.server.network.is_empty() {
        errors.push(ValidationError::MissingNetworkName);
    }

    if !config.listen.port_in_range() {
        errors.push(ValidationError::PortOutOfRange(config.listen.port));
    }

    if config.limits.max_line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::LineLengthTooSmall(config.limits.max_line_length));
    }
    if config.limits.sendq == 0 {
        errors.push(ValidationError::ZeroSendq);
    }
    if config.limits.topic_length == 0 {
        errors.push(ValidationError::ZeroTopicLength);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = Config::default();
        config.server.name = String::new();
        config.server.network = String::new();
        config.listen.port = 50000;
        config.limits.sendq = 0;
        config.limits.topic_length = 0;
        config.limits.max_line_length = 10;

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(matches!(errors[2], ValidationError::PortOutOfRange(50000)));
    }

    #[test]
    fn server_name_with_space_is_rejected() {
        let mut config = Config::default();
        config.server.name = "irc server".into();
        let errors = validate(&config).unwrap_err();
        assert!(matches!(errors[..], [ValidationError::InvalidServerName(_)]));
    }
}
