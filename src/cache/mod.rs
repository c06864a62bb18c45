//! Conditional-GET cache tokens.
//!
//! # Data Flow
//! ```text
//! structured payload (serde_json::Value)
//!     → hash.rs (canonical traversal → 64-bit FNV-1a)
//!     → etag.rs (low 32 bits → "xxxxxxxx" quoted tag)
//!     → ETag header / If-None-Match comparison in http::response
//! ```
//!
//! # Design Decisions
//! - Tags are computed from the payload, never from the serialized body
//! - Object keys are visited in sorted order so insertion order is irrelevant
//! - Tags are same-process cache tokens; collisions only cost a cache hit

pub mod etag;
pub mod hash;

pub use etag::{etag_for, format_etag, hex_digits, is_empty_payload};
pub use hash::structural_hash;
