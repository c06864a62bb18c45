//! Outbound response subsystem.
//!
//! # Data Flow
//! ```text
//! producer
//!     → response.rs / stream.rs (populate status, headers, body, payload)
//!     → completion.rs (attach completion handler + liveness probe)
//!     → Response::take / guard.rs (hand off between async stages)
//!     → finalize (ETag, completed = true, handler fires once)
//!     → transport (IntoResponse / into_http)
//! ```
//!
//! # Design Decisions
//! - One owner at a time; no locking inside a response
//! - Completion is exactly-once per generation; `clear` or a new handler
//!   starts the next generation
//! - Attachment goes through narrow set/release methods instead of field access

pub mod completion;
pub mod error;
pub mod guard;
pub mod id;
pub mod message;
pub mod outbound;
pub mod response;
pub mod stream;

pub use completion::{CompletionHandler, LivenessProbe, StreamCompletionHandler};
pub use error::{ResponseError, ResponseResult};
pub use guard::FinalizeGuard;
pub use id::ResponseId;
pub use message::Message;
pub use outbound::OutboundResponse;
pub use response::Response;
pub use stream::StreamResponse;
