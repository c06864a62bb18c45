//! Response lifecycle core for an embedded HTTP service.
//!
//! A [`Response`](http::Response) owns one outbound message and decides when
//! it is finished: producers fill it, hand it between async stages with
//! [`Response::take`](http::Response::take), and call `finalize`, which
//! attaches an ETag derived from the JSON payload and fires the completion
//! handler exactly once. [`StreamResponse`](http::StreamResponse) is the
//! capped-buffer variant for large bodies.

// Core subsystems
pub mod buffer;
pub mod cache;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::ResponseConfig;
pub use http::{Response, StreamResponse};
