//! Fixed-capacity body storage for streaming responses.
//!
//! # Data Flow
//! ```text
//! producer write(&[u8])
//!     → capped.rs (reject if it would exceed capacity, else append)
//!     → transport reads data(), then consume(n) once written
//! ```
//!
//! # Design Decisions
//! - Capacity is fixed at construction; the buffer never grows
//! - Writes are all-or-nothing: an oversized write leaves contents untouched
//! - Overflow is reported to the caller, never truncated silently

pub mod capped;

pub use capped::{BufferError, CappedBuffer, DEFAULT_CAPACITY};
