//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use response_lifecycle::http::CompletionHandler;

/// Counts how many times the handlers it creates have fired.
#[derive(Clone, Default)]
pub struct FireCounter(Arc<AtomicUsize>);

impl FireCounter {
    pub fn handler(&self) -> CompletionHandler {
        let count = self.0.clone();
        CompletionHandler::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// True if `tag` is a quoted 8-digit lowercase hex ETag.
#[allow(dead_code)]
pub fn is_etag(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    bytes.len() == 10
        && bytes[0] == b'"'
        && bytes[9] == b'"'
        && bytes[1..9]
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}
