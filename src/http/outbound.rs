//! Surface shared by the buffered and streaming variants.

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;

use crate::http::error::ResponseResult;
use crate::http::id::ResponseId;
use crate::http::response::Response;
use crate::http::stream::StreamResponse;

/// Operations a transport needs regardless of how the body is stored.
pub trait OutboundResponse {
    fn id(&self) -> ResponseId;
    fn status(&self) -> StatusCode;
    fn set_status(&mut self, status: StatusCode);
    fn add_header(&mut self, name: HeaderName, value: HeaderValue);
    fn header(&self, name: &str) -> Option<&str>;
    fn keep_alive(&self) -> bool;
    fn set_keep_alive(&mut self, keep: bool);
    fn prepare_payload(&mut self) -> ResponseResult<()>;
    fn clear(&mut self);
    fn is_completed(&self) -> bool;
    fn finalize(&mut self);
    fn is_alive(&self) -> bool;
}

macro_rules! delegate_outbound {
    ($ty:ty) => {
        impl OutboundResponse for $ty {
            fn id(&self) -> ResponseId {
                <$ty>::id(self)
            }
            fn status(&self) -> StatusCode {
                <$ty>::status(self)
            }
            fn set_status(&mut self, status: StatusCode) {
                <$ty>::set_status(self, status)
            }
            fn add_header(&mut self, name: HeaderName, value: HeaderValue) {
                <$ty>::add_header(self, name, value)
            }
            fn header(&self, name: &str) -> Option<&str> {
                <$ty>::header(self, name)
            }
            fn keep_alive(&self) -> bool {
                <$ty>::keep_alive(self)
            }
            fn set_keep_alive(&mut self, keep: bool) {
                <$ty>::set_keep_alive(self, keep)
            }
            fn prepare_payload(&mut self) -> ResponseResult<()> {
                <$ty>::prepare_payload(self)
            }
            fn clear(&mut self) {
                <$ty>::clear(self)
            }
            fn is_completed(&self) -> bool {
                <$ty>::is_completed(self)
            }
            fn finalize(&mut self) {
                <$ty>::finalize(self)
            }
            fn is_alive(&self) -> bool {
                <$ty>::is_alive(self)
            }
        }
    };
}

delegate_outbound!(Response);
delegate_outbound!(StreamResponse);
