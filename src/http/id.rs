//! Response identity for log correlation.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_RESPONSE_ID: AtomicU64 = AtomicU64::new(1);

/// Tag carried in every lifecycle log event of one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseId(u64);

impl ResponseId {
    pub(crate) fn new() -> Self {
        Self(NEXT_RESPONSE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resp-{}", self.0)
    }
}
