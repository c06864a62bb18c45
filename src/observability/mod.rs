//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! response lifecycle events
//!     → logging.rs (tracing subscriber, env-filtered)
//!     → metrics.rs (counters via the `metrics` facade)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`response_id`, `status`) on every lifecycle event
//! - Library code only emits; installing subscribers/recorders is the
//!   binary's job

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
