//! Configuration validation.
//!
//! Returns every problem found, not just the first.

use thiserror::Error;

use crate::config::schema::ResponseConfig;

/// Upper bound for a streaming body buffer (64 MiB).
pub const MAX_BUFFER_CAPACITY: usize = 64 * 1024 * 1024;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("stream.buffer_capacity must be greater than zero")]
    ZeroBufferCapacity,

    #[error("stream.buffer_capacity {0} exceeds maximum {max}", max = MAX_BUFFER_CAPACITY)]
    BufferCapacityTooLarge(usize),
}

pub fn validate_config(config: &ResponseConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.to_ascii_lowercase();
    if !LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    let capacity = config.stream.buffer_capacity;
    if capacity == 0 {
        errors.push(ValidationError::ZeroBufferCapacity);
    } else if capacity > MAX_BUFFER_CAPACITY {
        errors.push(ValidationError::BufferCapacityTooLarge(capacity));
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
    fn test_default_is_valid() {
        assert!(validate_config(&ResponseConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ResponseConfig::default();
        config.logging.level = "loud".into();
        config.stream.buffer_capacity = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLogLevel("loud".into()),
                ValidationError::ZeroBufferCapacity,
            ]
        );
    }

    #[test]
    fn test_capacity_upper_bound() {
        let mut config = ResponseConfig::default();
        config.logging.level = "DEBUG".into();
        config.stream.buffer_capacity = MAX_BUFFER_CAPACITY + 1;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BufferCapacityTooLarge(MAX_BUFFER_CAPACITY + 1)]);
    }
}
