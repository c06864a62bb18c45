//! Append-only byte buffer with a hard capacity bound.

use thiserror::Error;

/// Default capacity for streaming bodies (1 MiB).
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Errors raised by [`CappedBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The write would exceed the buffer's fixed capacity.
    #[error("buffer overflow: requested {requested} bytes, {remaining} remaining")]
    Overflow { requested: usize, remaining: usize },
}

/// A byte buffer that refuses to grow past its capacity.
#[derive(Debug)]
pub struct CappedBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl CappedBuffer {
    /// Create an empty buffer bounded at `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `bytes`, or fail without writing anything if they don't fit.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, BufferError> {
        let remaining = self.remaining();
        if bytes.len() > remaining {
            return Err(BufferError::Overflow {
                requested: bytes.len(),
                remaining,
            });
        }
        self.data.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Readable contents.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Drop the first `n` readable bytes (clamped to `len`).
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.data.len());
        self.data.drain(..n);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Default for CappedBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_within_capacity() {
        let mut buf = CappedBuffer::with_capacity(8);
        assert_eq!(buf.write(b"abc").unwrap(), 3);
        assert_eq!(buf.write(b"defgh").unwrap(), 5);
        assert_eq!(buf.data(), b"abcdefgh");
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn oversized_write_is_rejected_whole() {
        let mut buf = CappedBuffer::with_capacity(4);
        buf.write(b"ab").unwrap();

        let err = buf.write(b"cde").unwrap_err();
        assert_eq!(
            err,
            BufferError::Overflow {
                requested: 3,
                remaining: 2
            }
        );
        // Nothing partial was appended
        assert_eq!(buf.data(), b"ab");
    }

    #[test]
    fn consume_frees_space() {
        let mut buf = CappedBuffer::with_capacity(4);
        buf.write(b"abcd").unwrap();
        buf.consume(3);
        assert_eq!(buf.data(), b"d");
        assert_eq!(buf.remaining(), 3);

        buf.consume(100);
        assert!(buf.is_empty());
    }

    #[test]
    fn default_is_one_mebibyte() {
        let buf = CappedBuffer::default();
        assert_eq!(buf.capacity(), 1024 * 1024);
        assert!(buf.is_empty());
    }

    #[test]
    fn error_display() {
        let err = BufferError::Overflow {
            requested: 10,
            remaining: 2,
        };
        assert_eq!(
            err.to_string(),
            "buffer overflow: requested 10 bytes, 2 remaining"
        );
    }
}
