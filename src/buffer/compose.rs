//! Buffer-to-buffer composition
//!
//! Each operation reads the source's full capacity, not just the bytes in
//! front of its cursor, and feeds it to the matching byte-sequence write.

use super::core::{BUF_MAX_SIZE, ByteBuffer};
use super::mode::OverflowMode;
use std::io;

impl ByteBuffer<'_> {
    /// Appends the full content of `src`.
    #[inline]
    pub fn append_buffer(&mut self, src: &ByteBuffer<'_>) -> usize {
        self.append_bytes(src.as_slice())
    }

    /// Inserts the full content of `src` at index 0.
    #[inline]
    pub fn prepend_buffer(&mut self, src: &ByteBuffer<'_>) -> usize {
        self.prepend_bytes(src.as_slice())
    }

    /// Replaces from `index` with the full content of `src`.
    #[inline]
    pub fn replace_buffer(&mut self, src: &ByteBuffer<'_>, index: usize) -> usize {
        self.replace_bytes(index, src.as_slice())
    }

    /// Inserts the full content of `src` at `index`.
    #[inline]
    pub fn insert_buffer(&mut self, src: &ByteBuffer<'_>, index: usize) -> usize {
        self.insert_bytes(index, src.as_slice())
    }

    /// Concatenates two buffers into a new fully owned one.
    ///
    /// See [`join_buffer`].
    #[inline]
    pub fn join(
        a: &ByteBuffer<'_>,
        b: &ByteBuffer<'_>,
        mode: OverflowMode,
    ) -> Option<Box<ByteBuffer<'static>>> {
        join_buffer(a, b, mode)
    }
}

/// Concatenates the full content of `a` then `b` into a new fully owned
/// buffer of capacity `a.capacity() + b.capacity()`.
///
/// The copy ignores `mode`, which only governs later writes to the result.
/// The result's cursor sits at the end of the joined content. Returns
/// `None` if either input has been released or if the combined capacity
/// exceeds [`BUF_MAX_SIZE`].
///
/// # Examples
///
/// ```
/// use boundbuf::{join_buffer, ByteBuffer, OverflowMode};
///
/// let mut a = ByteBuffer::init_new(OverflowMode::Truncate, 3);
/// a.append_bytes(b"foo");
/// let mut b = ByteBuffer::init_new(OverflowMode::Truncate, 3);
/// b.append_bytes(b"bar");
///
/// let joined = join_buffer(&a, &b, OverflowMode::Ring).unwrap();
/// assert_eq!(joined.as_slice(), b"foobar");
/// assert_eq!(joined.mode(), OverflowMode::Ring);
/// ```
pub fn join_buffer(
    a: &ByteBuffer<'_>,
    b: &ByteBuffer<'_>,
    mode: OverflowMode,
) -> Option<Box<ByteBuffer<'static>>> {
    if a.is_released() || b.is_released() {
        tracing::debug!(target: "boundbuf::buffer", "join skipped, released input");
        return None;
    }

    let capacity = match a.capacity().checked_add(b.capacity()) {
        Some(capacity) if capacity <= BUF_MAX_SIZE => capacity,
        _ => {
            tracing::debug!(
                target: "boundbuf::buffer",
                left = a.capacity(),
                right = b.capacity(),
                "join exceeds maximum size"
            );
            return None;
        }
    };

    // Copied directly: under Skip the second append would never fit, since
    // it ends exactly at capacity.
    let mut joined = ByteBuffer::new(mode, capacity);
    let (left, right) = joined.as_mut_slice().split_at_mut(a.capacity());
    left.copy_from_slice(a.as_slice());
    right.copy_from_slice(b.as_slice());
    joined.cursor = capacity;
    tracing::debug!(target: "boundbuf::buffer", capacity, mode = %mode, "joined buffers");
    Some(joined)
}

/// Writes go through [`append_bytes`](ByteBuffer::append_bytes), so the
/// overflow mode decides what lands. A write that stores nothing reports
/// `Ok(0)`.
impl io::Write for ByteBuffer<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.append_bytes(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
