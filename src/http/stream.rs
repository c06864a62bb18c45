//! Streaming response backed by a fixed-capacity body buffer.
//!
//! # Responsibilities
//! - Own status, headers and a capped byte body for large responses
//! - Fire a zero-argument completion handler exactly once on `finalize`
//!
//! # Design Decisions
//! - No relocation: the transport holds views into the body buffer while a
//!   streaming write is in progress, so the type offers no `take`, `Default`
//!   or `Clone`
//! - Buffer overflow is the buffer's error and is returned unchanged

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, StatusCode, Version};

use crate::buffer::{BufferError, CappedBuffer, DEFAULT_CAPACITY};
use crate::config::StreamConfig;
use crate::http::completion::{LivenessProbe, StreamCompletionHandler};
use crate::http::error::{ResponseError, ResponseResult};
use crate::http::id::ResponseId;
use crate::http::message::Message;
use crate::observability::metrics;

/// One outbound response whose body is written into a capped buffer.
#[derive(Debug)]
pub struct StreamResponse {
    id: ResponseId,
    message: Message<CappedBuffer>,
    completed: bool,
    completion_handler: Option<StreamCompletionHandler>,
    liveness_probe: Option<LivenessProbe>,
}

impl StreamResponse {
    /// A blank `200 OK` response with a 1 MiB body limit.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: ResponseId::new(),
            message: Message::with_body(CappedBuffer::with_capacity(capacity)),
            completed: false,
            completion_handler: None,
            liveness_probe: None,
        }
    }

    pub fn from_config(config: &StreamConfig) -> Self {
        Self::with_capacity(config.buffer_capacity)
    }

    pub fn id(&self) -> ResponseId {
        self.id
    }

    pub fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.message.set_header(name, value);
    }

    pub fn try_add_header(&mut self, name: &str, value: &str) -> ResponseResult<()> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.message.set_header(name, value);
        Ok(())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.message.header(name)
    }

    pub fn headers(&self) -> &HeaderMap {
        self.message.headers()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.message.set_status(status);
    }

    pub fn set_status_code(&mut self, code: u16) -> ResponseResult<()> {
        let status = StatusCode::from_u16(code).map_err(|_| ResponseError::InvalidStatus(code))?;
        self.message.set_status(status);
        Ok(())
    }

    pub fn status(&self) -> StatusCode {
        self.message.status()
    }

    pub fn status_code(&self) -> u16 {
        self.message.status().as_u16()
    }

    pub fn reason(&self) -> &'static str {
        self.message.status().canonical_reason().unwrap_or("")
    }

    pub fn set_version(&mut self, version: Version) {
        self.message.set_version(version);
    }

    pub fn set_keep_alive(&mut self, keep: bool) {
        self.message.set_keep_alive(keep);
    }

    pub fn keep_alive(&self) -> bool {
        self.message.keep_alive()
    }

    pub fn body(&self) -> &CappedBuffer {
        self.message.body()
    }

    pub fn body_mut(&mut self) -> &mut CappedBuffer {
        self.message.body_mut()
    }

    /// Append to the body; fails without writing if the buffer is full.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        self.message.body_mut().write(bytes).inspect_err(|e| {
            tracing::debug!(response_id = %self.id, error = %e, "Streaming write rejected");
            metrics::record_stream_overflow();
        })
    }

    pub fn prepare_payload(&mut self) -> ResponseResult<()> {
        self.message.prepare_payload()
    }

    /// Reset status, headers and body, reusing the body allocation.
    pub fn clear(&mut self) {
        tracing::debug!(response_id = %self.id, "Clearing response containers");
        self.message.body_mut().clear();
        self.message.headers_mut().clear();
        self.message.set_status(StatusCode::OK);
        self.message.set_version(Version::HTTP_11);
        self.completed = false;
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the response completed and fire the handler once.
    pub fn finalize(&mut self) {
        if self.completed {
            tracing::debug!(response_id = %self.id, "Streaming response was finalized twice");
            metrics::record_double_finalize(metrics::STREAMING);
            return;
        }
        self.completed = true;
        metrics::record_finalized(metrics::STREAMING, self.status_code());

        tracing::debug!(response_id = %self.id, "Calling completion handler");
        if let Some(handler) = self.completion_handler.take() {
            tracing::debug!(response_id = %self.id, "Completion handler was valid");
            handler.invoke();
        }
    }

    pub fn set_completion_handler(&mut self, handler: StreamCompletionHandler) {
        tracing::debug!(response_id = %self.id, "Setting completion handler");
        self.completion_handler = Some(handler);
        self.completed = false;
    }

    pub fn release_completion_handler(&mut self) -> Option<StreamCompletionHandler> {
        self.completed = true;
        self.completion_handler.take()
    }

    pub fn set_liveness_probe(&mut self, probe: LivenessProbe) {
        self.liveness_probe = Some(probe);
    }

    pub fn release_liveness_probe(&mut self) -> Option<LivenessProbe> {
        self.liveness_probe.take()
    }

    pub fn is_alive(&self) -> bool {
        self.liveness_probe.as_ref().is_some_and(LivenessProbe::check)
    }

    pub fn message(&self) -> &axum::http::Response<CappedBuffer> {
        self.message.as_http()
    }
}
