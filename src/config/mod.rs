//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResponseConfig (validated, immutable)
//!     → logging setup, StreamResponse::from_config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal or missing configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggingConfig, ResponseConfig, StreamConfig};
pub use validation::ValidationError;
