//! Completion and liveness capabilities attached to a response.
//!
//! # Responsibilities
//! - Wrap the single-use callback fired when a response is finalized
//! - Wrap the advisory probe asking whether the transport is still usable
//!
//! # Design Decisions
//! - Handlers are `FnOnce`: invoking consumes them, so a second call cannot
//!   be expressed
//! - Both capabilities are `Send` so a response can cross task boundaries
//! - Neither is `Clone`; transfer always goes through `Option::take`

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::http::response::Response;

/// Single-use callback receiving the finished buffered response.
pub struct CompletionHandler(Box<dyn FnOnce(&mut Response) + Send>);

impl CompletionHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnOnce(&mut Response) + Send + 'static,
    {
        Self(Box::new(handler))
    }

    /// Run the handler, consuming it.
    pub fn invoke(self, response: &mut Response) {
        (self.0)(response)
    }
}

impl fmt::Debug for CompletionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionHandler")
    }
}

/// Single-use callback signalling that a streaming response is finished.
pub struct StreamCompletionHandler(Box<dyn FnOnce() + Send>);

impl StreamCompletionHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Box::new(handler))
    }

    pub fn invoke(self) {
        (self.0)()
    }
}

impl fmt::Debug for StreamCompletionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamCompletionHandler")
    }
}

/// Advisory check of the owning connection's health.
pub struct LivenessProbe(Box<dyn Fn() -> bool + Send>);

impl LivenessProbe {
    pub fn new<F>(probe: F) -> Self
    where
        F: Fn() -> bool + Send + 'static,
    {
        Self(Box::new(probe))
    }

    /// Probe backed by a flag the connection owner clears when it closes.
    pub fn from_flag(alive: Arc<AtomicBool>) -> Self {
        Self::new(move || alive.load(Ordering::Acquire))
    }

    pub fn check(&self) -> bool {
        (self.0)()
    }
}

impl fmt::Debug for LivenessProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LivenessProbe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_follows_flag() {
        let alive = Arc::new(AtomicBool::new(true));
        let probe = LivenessProbe::from_flag(alive.clone());
        assert!(probe.check());

        alive.store(false, Ordering::Release);
        assert!(!probe.check());
    }

    #[test]
    fn stream_handler_runs_once() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let handler = StreamCompletionHandler::new(move || flag.store(true, Ordering::SeqCst));
        handler.invoke();
        assert!(fired.load(Ordering::SeqCst));
    }
}
