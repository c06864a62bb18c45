//! Buffered response with structured payload and conditional-GET support.
//!
//! # Responsibilities
//! - Own status, headers, text body and JSON payload of one response
//! - Derive the ETag from the payload and answer matching conditional GETs
//! - Fire the attached completion handler exactly once on `finalize`
//! - Relocate in-flight state between pipeline stages with `take`
//!
//! # Lifecycle
//! ```text
//! new ─▶ populate ─▶ [take ─▶ populate]* ─▶ finalize ─▶ handler(&mut res)
//!  ▲                                                         │
//!  └──────────────────────── clear ◀─────────────────────────┘
//! ```
//!
//! # Design Decisions
//! - A completed response keeps no handler, so relocation never carries one
//!   past completion
//! - Finalize on a completed response is logged and ignored
//! - The payload stays authoritative; the body is only rendered from it on
//!   hand-off to the transport

use axum::body::Body;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::{HeaderMap, StatusCode, Version};
use axum::response::IntoResponse;
use serde_json::Value;

use crate::cache::{etag_for, is_empty_payload};
use crate::http::completion::{CompletionHandler, LivenessProbe};
use crate::http::error::{ResponseError, ResponseResult};
use crate::http::id::ResponseId;
use crate::http::message::{forbids_body, Message};
use crate::observability::metrics;

/// One outbound response with a text body and an optional JSON payload.
#[derive(Debug)]
pub struct Response {
    id: ResponseId,
    message: Message<String>,
    payload: Value,
    completed: bool,
    expected_hash: Option<String>,
    completion_handler: Option<CompletionHandler>,
    liveness_probe: Option<LivenessProbe>,
}

impl Response {
    /// A blank `200 OK` response.
    pub fn new() -> Self {
        Self::from_message(Message::default())
    }

    fn from_message(message: Message<String>) -> Self {
        Self {
            id: ResponseId::new(),
            message,
            payload: Value::Null,
            completed: false,
            expected_hash: None,
            completion_handler: None,
            liveness_probe: None,
        }
    }

    pub fn id(&self) -> ResponseId {
        self.id
    }

    // --- Message store ---

    /// Set a header, replacing any previous value.
    pub fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.message.set_header(name, value);
    }

    /// Set a header from untyped strings.
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

    /// Canonical reason phrase, empty for unregistered codes.
    pub fn reason(&self) -> &'static str {
        self.message.status().canonical_reason().unwrap_or("")
    }

    pub fn set_version(&mut self, version: Version) {
        self.message.set_version(version);
    }

    pub fn body(&self) -> &String {
        self.message.body()
    }

    pub fn body_mut(&mut self) -> &mut String {
        self.message.body_mut()
    }

    pub fn append(&mut self, text: &str) {
        self.message.body_mut().push_str(text);
    }

    pub fn set_keep_alive(&mut self, keep: bool) {
        self.message.set_keep_alive(keep);
    }

    pub fn keep_alive(&self) -> bool {
        self.message.keep_alive()
    }

    /// Compute framing headers (`Content-Length`) from the body.
    pub fn prepare_payload(&mut self) -> ResponseResult<()> {
        self.message.prepare_payload()
    }

    /// Reset content state for reuse on the same connection.
    ///
    /// The completion handler and liveness probe are left as they are.
    pub fn clear(&mut self) {
        tracing::debug!(response_id = %self.id, "Clearing response containers");
        self.message = Message::default();
        self.payload = Value::Null;
        self.completed = false;
        self.expected_hash = None;
    }

    // --- Structured payload ---

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut Value {
        &mut self.payload
    }

    pub fn set_payload(&mut self, payload: Value) {
        self.payload = payload;
    }

    /// Serialize the payload into an empty body as `application/json`.
    ///
    /// Does nothing when the body already has content, the payload is empty
    /// or the status forbids a body.
    pub fn render_payload(&mut self) -> ResponseResult<()> {
        if !self.message.body().is_empty()
            || is_empty_payload(&self.payload)
            || forbids_body(self.status())
        {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(&self.payload)?;
        *self.message.body_mut() = text;
        if !self.message.headers().contains_key(header::CONTENT_TYPE) {
            self.message.set_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        Ok(())
    }

    // --- Conditional GET ---

    /// Quoted tag for the payload, or `""` unless the status is `200 OK` and
    /// the payload is non-empty.
    pub fn compute_etag(&self) -> String {
        if self.status() != StatusCode::OK {
            return String::new();
        }
        etag_for(&self.payload).unwrap_or_default()
    }

    /// Store the client's `If-None-Match` validator.
    pub fn set_expected_hash(&mut self, hash: impl Into<String>) {
        self.expected_hash = Some(hash.into());
    }

    pub fn expected_hash(&self) -> Option<&str> {
        self.expected_hash.as_deref()
    }

    /// Set the ETag header and turn the response into `304 Not Modified`
    /// when it matches the expected hash.
    pub fn set_hash_and_handle_not_modified(&mut self) {
        if self.status() != StatusCode::OK {
            return;
        }
        let Some(tag) = etag_for(&self.payload) else {
            return;
        };
        self.set_etag_header(&tag);

        if self.expected_hash.as_deref() == Some(tag.as_str()) {
            tracing::debug!(response_id = %self.id, etag = %tag, "Payload not modified");
            self.payload = Value::Null;
            self.message.body_mut().clear();
            let headers = self.message.headers_mut();
            headers.remove(header::CONTENT_TYPE);
            headers.remove(header::CONTENT_LENGTH);
            self.message.set_status(StatusCode::NOT_MODIFIED);
            metrics::record_not_modified();
        }
    }

    fn set_etag_header(&mut self, tag: &str) {
        match HeaderValue::from_str(tag) {
            Ok(value) => self.message.set_header(header::ETAG, value),
            Err(e) => tracing::warn!(response_id = %self.id, error = %e, "Unusable ETag"),
        }
    }

    // --- Completion ---

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Finish the response: attach the ETag, mark it completed and fire the
    /// completion handler if one is attached.
    ///
    /// Calling this on a completed response only refreshes the ETag header.
    pub fn finalize(&mut self) {
        let etag = self.compute_etag();
        if !etag.is_empty() {
            self.set_etag_header(&etag);
        }

        if self.completed {
            tracing::error!(response_id = %self.id, "Response was finalized twice");
            metrics::record_double_finalize(metrics::BUFFERED);
            return;
        }
        self.completed = true;
        metrics::record_finalized(metrics::BUFFERED, self.status_code());

        tracing::debug!(response_id = %self.id, status = self.status_code(), "Calling completion handler");
        if let Some(handler) = self.completion_handler.take() {
            tracing::debug!(response_id = %self.id, "Completion handler was valid");
            handler.invoke(self);
        }
    }

    /// Attach a handler for the next completion; the response is no longer
    /// considered completed.
    pub fn set_completion_handler(&mut self, handler: CompletionHandler) {
        tracing::debug!(response_id = %self.id, "Setting completion handler");
        self.completion_handler = Some(handler);
        self.completed = false;
    }

    /// Detach the handler so the caller can fire it through another path.
    ///
    /// The response is marked completed so `finalize` cannot fire it again.
    pub fn release_completion_handler(&mut self) -> Option<CompletionHandler> {
        tracing::debug!(
            response_id = %self.id,
            present = self.completion_handler.is_some(),
            "Releasing completion handler"
        );
        self.completed = true;
        self.completion_handler.take()
    }

    // --- Liveness ---

    pub fn set_liveness_probe(&mut self, probe: LivenessProbe) {
        self.liveness_probe = Some(probe);
    }

    pub fn release_liveness_probe(&mut self) -> Option<LivenessProbe> {
        self.liveness_probe.take()
    }

    /// True only if a probe is attached and reports the connection usable.
    pub fn is_alive(&self) -> bool {
        self.liveness_probe.as_ref().is_some_and(LivenessProbe::check)
    }

    // --- Relocation ---

    /// Move all state into a new response, leaving `self` blank.
    ///
    /// The completion handler travels only while the response is still
    /// pending; the liveness probe always travels.
    pub fn take(&mut self) -> Response {
        let mut moved = std::mem::take(self);
        if moved.completed {
            moved.completion_handler = None;
        }
        tracing::debug!(
            from = %self.id,
            response_id = %moved.id,
            completed = moved.completed,
            "Moving response containers"
        );
        moved
    }

    // --- Transport hand-off ---

    pub fn message(&self) -> &axum::http::Response<String> {
        self.message.as_http()
    }

    /// Convert into an `http` message; any handler and probe are dropped.
    pub fn into_http(self) -> axum::http::Response<String> {
        self.message.into_inner()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl From<axum::http::Response<String>> for Response {
    fn from(message: axum::http::Response<String>) -> Self {
        Self::from_message(Message::from(message))
    }
}

impl IntoResponse for Response {
    fn into_response(mut self) -> axum::response::Response {
        if let Err(e) = self.render_payload() {
            tracing::error!(response_id = %self.id, error = %e, "Failed to render payload");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        if let Err(e) = self.prepare_payload() {
            tracing::warn!(response_id = %self.id, error = %e, "Discarding body");
            self.message.body_mut().clear();
            self.message.headers_mut().remove(header::CONTENT_LENGTH);
        }
        self.into_http().map(Body::from)
    }
}
