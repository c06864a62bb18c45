//! Message store shared by both response variants.
//!
//! # Responsibilities
//! - Hold status line, headers and body for one outbound message
//! - Derive keep-alive from the `Connection` header and HTTP version
//! - Compute framing headers before the transport writes the message

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{StatusCode, Version};

use crate::buffer::CappedBuffer;
use crate::http::error::{ResponseError, ResponseResult};

/// Body types whose length can be framed with `Content-Length`.
pub trait PayloadLength {
    fn payload_len(&self) -> usize;
}

impl PayloadLength for String {
    fn payload_len(&self) -> usize {
        self.len()
    }
}

impl PayloadLength for CappedBuffer {
    fn payload_len(&self) -> usize {
        self.len()
    }
}

/// Status, headers, keep-alive state and body of one response.
#[derive(Debug)]
pub struct Message<B> {
    inner: axum::http::Response<B>,
}

impl<B> Message<B> {
    /// A `200 OK`, HTTP/1.1 message with no headers around `body`.
    pub fn with_body(body: B) -> Self {
        Self {
            inner: axum::http::Response::new(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        *self.inner.status_mut() = status;
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn set_version(&mut self, version: Version) {
        *self.inner.version_mut() = version;
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    /// Set `name`, replacing any existing values.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.headers_mut().insert(name, value);
    }

    /// First value of `name` (case-insensitive), if it is visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &B {
        self.inner.body()
    }

    pub fn body_mut(&mut self) -> &mut B {
        self.inner.body_mut()
    }

    /// Whether the connection stays open after this message.
    ///
    /// HTTP/1.1 and later default to persistent unless `Connection: close`;
    /// HTTP/1.0 requires an explicit `Connection: keep-alive`.
    pub fn keep_alive(&self) -> bool {
        let tokens = connection_tokens(self.headers());
        if is_legacy(self.version()) {
            tokens.iter().any(|t| t.eq_ignore_ascii_case("keep-alive"))
        } else {
            !tokens.iter().any(|t| t.eq_ignore_ascii_case("close"))
        }
    }

    /// Rewrite the `Connection` header so that `keep_alive()` returns `keep`.
    ///
    /// Unrelated tokens (e.g. `upgrade`) are preserved.
    pub fn set_keep_alive(&mut self, keep: bool) {
        let mut tokens: Vec<String> = connection_tokens(self.headers())
            .into_iter()
            .filter(|t| !t.eq_ignore_ascii_case("close") && !t.eq_ignore_ascii_case("keep-alive"))
            .collect();

        match (is_legacy(self.version()), keep) {
            (true, true) => tokens.push("keep-alive".to_string()),
            (false, false) => tokens.push("close".to_string()),
            _ => {}
        }

        let headers = self.inner.headers_mut();
        if tokens.is_empty() {
            headers.remove(header::CONNECTION);
            return;
        }
        match HeaderValue::from_str(&tokens.join(", ")) {
            Ok(value) => {
                headers.insert(header::CONNECTION, value);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unrepresentable Connection header");
                headers.remove(header::CONNECTION);
            }
        }
    }

    /// Borrow the underlying `http` message.
    pub fn as_http(&self) -> &axum::http::Response<B> {
        &self.inner
    }

    pub fn into_inner(self) -> axum::http::Response<B> {
        self.inner
    }
}

impl<B: PayloadLength> Message<B> {
    /// Set framing headers from the current body.
    ///
    /// Statuses that forbid a body (1xx, 204, 304) get no `Content-Length`
    /// and fail if the body is non-empty.
    pub fn prepare_payload(&mut self) -> ResponseResult<()> {
        let status = self.status();
        let len = self.inner.body().payload_len();
        let headers = self.inner.headers_mut();
        headers.remove(header::TRANSFER_ENCODING);

        if forbids_body(status) {
            headers.remove(header::CONTENT_LENGTH);
            if len > 0 {
                return Err(ResponseError::BodyNotAllowed(status));
            }
            return Ok(());
        }

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        Ok(())
    }
}

impl<B: Default> Default for Message<B> {
    fn default() -> Self {
        Self::with_body(B::default())
    }
}

impl<B> From<axum::http::Response<B>> for Message<B> {
    fn from(inner: axum::http::Response<B>) -> Self {
        Self { inner }
    }
}

fn is_legacy(version: Version) -> bool {
    version == Version::HTTP_10 || version == Version::HTTP_09
}

/// Statuses that must not carry a body: 1xx, 204 and 304.
pub fn forbids_body(status: StatusCode) -> bool {
    status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
}

fn connection_tokens(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
