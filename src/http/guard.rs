//! Finalize-on-drop ownership of a response.

use std::ops::{Deref, DerefMut};

use crate::http::response::Response;

/// Owns a response across asynchronous stages and finalizes it when the
/// last stage lets go, including early-return paths.
#[derive(Debug)]
pub struct FinalizeGuard {
    response: Response,
    armed: bool,
}

impl FinalizeGuard {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            armed: true,
        }
    }

    /// Give the response back without finalizing it.
    pub fn into_inner(mut self) -> Response {
        self.armed = false;
        self.response.take()
    }
}

impl Deref for FinalizeGuard {
    type Target = Response;
    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

impl DerefMut for FinalizeGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.response
    }
}

impl Drop for FinalizeGuard {
    fn drop(&mut self) {
        if self.armed {
            self.response.finalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::completion::CompletionHandler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn guarded() -> (FinalizeGuard, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let mut res = Response::new();
        res.set_completion_handler(CompletionHandler::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        (FinalizeGuard::new(res), count)
    }

    #[test]
    fn drop_finalizes() {
        let (mut guard, count) = guarded();
        guard.append("body");
        assert_eq!(count.load(Ordering::SeqCst), 0);
        drop(guard);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_finalize_then_drop_fires_once() {
        let (mut guard, count) = guarded();
        guard.finalize();
        drop(guard);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn into_inner_disarms() {
        let (guard, count) = guarded();
        let mut res = guard.into_inner();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!res.is_completed());
        res.finalize();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
