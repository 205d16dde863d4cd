use bytes::{Buf, BytesMut};

/// Initial capacity before any doubling.
const INITIAL_CAPACITY: usize = 8;

/// Growable read buffer holding the unconsumed bytes between reads.
///
/// The parser consumes from the front; consumed bytes are discarded and their
/// capacity reclaimed. When the buffer is full, capacity doubles before the
/// next read.
#[derive(Debug)]
pub struct ReadBuffer {
    buf: BytesMut,
}

impl ReadBuffer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// All bytes read but not yet consumed.
    pub fn unread(&self) -> &[u8] {
        &self.buf
    }

    /// Discards `n` bytes from the front.
    pub fn consume(&mut self, n: usize) {
        self.buf.advance(n);
    }

    /// Doubles capacity when there is no room left for the next read.
    pub fn grow_if_full(&mut self) {
        if self.buf.len() == self.buf.capacity() {
            self.buf.reserve(self.buf.capacity().max(INITIAL_CAPACITY));
        }
    }

    /// The backing buffer, for appending via `AsyncReadExt::read_buf`.
    pub fn bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for ReadBuffer {
    fn default() -> Self {
        Self::new()
    }
}
