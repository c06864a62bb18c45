//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_CAPACITY;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ResponseConfig {
    /// Log output settings.
    pub logging: LoggingConfig,

    /// Streaming response settings.
    pub stream: StreamConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Colored output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Streaming response configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Fixed body buffer size in bytes.
    pub buffer_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResponseConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.stream.buffer_capacity, 1024 * 1024);
    }

    #[test]
    fn test_partial_toml() {
        let config: ResponseConfig = toml::from_str("[stream]\nbuffer_capacity = 4096\n").unwrap();
        assert_eq!(config.stream.buffer_capacity, 4096);
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
