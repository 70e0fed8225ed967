//! Cursor-driven write operations
//!
//! Every write funnels into [`ByteBuffer::append_bytes`], which matches the
//! [`OverflowMode`] once and hands off to one of three bounded writers.
//! Replace relocates the cursor around an append; insert additionally parks
//! the tail in a pooled scratch region and re-appends it afterwards.
//!
//! The returned count is the number of new content bytes that landed in the
//! buffer. It never includes re-appended tail bytes.

use super::core::ByteBuffer;
use super::mode::OverflowMode;
use crate::error::Result;
use crate::scratch;
use std::fmt::{self, Write as _};
use zeroize::Zeroizing;

const TARGET: &str = "boundbuf::buffer";

impl ByteBuffer<'_> {
    /// Writes one byte at the cursor.
    ///
    /// When the buffer is full, Truncate and Skip drop the byte; Ring writes
    /// it at index 0 and leaves the cursor at 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 2);
    /// buf.append_byte(b'a');
    /// buf.append_byte(b'b');
    /// buf.append_byte(b'c');
    /// assert_eq!(buf.as_slice(), b"cb");
    /// assert_eq!(buf.cursor(), 1);
    /// ```
    pub fn append_byte(&mut self, byte: u8) -> usize {
        if self.capacity == 0 {
            return 0;
        }
        if self.cursor < self.capacity {
            let cursor = self.cursor;
            self.as_mut_slice()[cursor] = byte;
            self.cursor += 1;
            return 1;
        }
        match self.mode {
            OverflowMode::Truncate | OverflowMode::Skip => {
                tracing::trace!(target: TARGET, mode = %self.mode, "byte dropped, buffer full");
                0
            }
            OverflowMode::Ring => {
                tracing::trace!(target: TARGET, "ring wrap");
                self.as_mut_slice()[0] = byte;
                self.cursor = 1;
                1
            }
        }
    }

    /// Writes `bytes` at the cursor under the buffer's overflow mode.
    ///
    /// - Truncate copies the prefix that fits and drops the rest.
    /// - Skip drops the whole call unless `cursor + bytes.len() < capacity`.
    /// - Ring behaves like repeated [`append_byte`](Self::append_byte) calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 4);
    /// assert_eq!(buf.append_bytes(b"abcdef"), 4);
    /// assert_eq!(buf.append_bytes(b"g"), 0);
    /// assert_eq!(buf.as_slice(), b"abcd");
    /// ```
    pub fn append_bytes(&mut self, bytes: &[u8]) -> usize {
        if bytes.is_empty() || self.capacity == 0 {
            return 0;
        }
        match self.mode {
            OverflowMode::Truncate => self.write_truncate(bytes),
            OverflowMode::Skip => self.write_skip(bytes),
            OverflowMode::Ring => self.write_ring(bytes),
        }
    }

    /// Renders `args` and appends the rendered bytes.
    ///
    /// The [`append_fmt!`](crate::append_fmt) macro builds the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`](crate::BufferError::Format) if a
    /// formatting implementation fails; the buffer is left untouched.
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        let rendered = render(args)?;
        Ok(self.append_bytes(rendered.as_bytes()))
    }

    /// Appends one byte at `index`, then restores the cursor.
    pub fn replace_byte(&mut self, index: usize, byte: u8) -> usize {
        self.at_cursor(index, |buf| buf.append_byte(byte))
    }

    /// Appends `bytes` at `index`, then restores the cursor.
    ///
    /// The write follows the overflow mode: under Ring a replace near the end
    /// wraps onto the prefix, under Skip a replace that does not fit is
    /// dropped entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 10);
    /// buf.append_bytes(b"0123456789");
    /// buf.replace_bytes(3, b"VWX");
    /// assert_eq!(buf.as_slice(), b"012VWX6789");
    /// assert_eq!(buf.cursor(), 10);
    /// ```
    pub fn replace_bytes(&mut self, index: usize, bytes: &[u8]) -> usize {
        self.at_cursor(index, |buf| buf.append_bytes(bytes))
    }

    /// Renders `args` and replaces from `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`](crate::BufferError::Format) if a
    /// formatting implementation fails.
    pub fn replace_fmt(&mut self, index: usize, args: fmt::Arguments<'_>) -> Result<usize> {
        let rendered = render(args)?;
        Ok(self.replace_bytes(index, rendered.as_bytes()))
    }

    /// Inserts one byte at `index`, shifting the tail right.
    ///
    /// The byte is written like [`append_byte`](Self::append_byte), so under
    /// Skip it still lands at the last index.
    pub fn insert_byte(&mut self, index: usize, byte: u8) -> usize {
        self.shift_insert(index, |buf| buf.append_byte(byte))
    }

    /// Inserts `bytes` at `index`, shifting `[index, capacity)` right.
    ///
    /// No-op if `index >= capacity`. Both the new content and the shifted
    /// tail go through the overflow mode, so whatever no longer fits is lost
    /// from the end of the buffer. The cursor is restored afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 8);
    /// buf.append_bytes(b"abcdefgh");
    /// buf.insert_bytes(2, b"XY");
    /// assert_eq!(buf.as_slice(), b"abXYcdef");
    /// ```
    pub fn insert_bytes(&mut self, index: usize, bytes: &[u8]) -> usize {
        self.shift_insert(index, |buf| buf.append_bytes(bytes))
    }

    /// Renders `args` and inserts at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`](crate::BufferError::Format) if a
    /// formatting implementation fails.
    pub fn insert_fmt(&mut self, index: usize, args: fmt::Arguments<'_>) -> Result<usize> {
        let rendered = render(args)?;
        Ok(self.insert_bytes(index, rendered.as_bytes()))
    }

    /// Inserts one byte at index 0.
    #[inline]
    pub fn prepend_byte(&mut self, byte: u8) -> usize {
        self.insert_byte(0, byte)
    }

    /// Inserts `bytes` at index 0.
    #[inline]
    pub fn prepend_bytes(&mut self, bytes: &[u8]) -> usize {
        self.insert_bytes(0, bytes)
    }

    /// Renders `args` and inserts at index 0.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`](crate::BufferError::Format) if a
    /// formatting implementation fails.
    #[inline]
    pub fn prepend_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<usize> {
        self.insert_fmt(0, args)
    }

    /// Parks `[index, capacity)` in a scratch region, runs `write` at `index`
    /// and re-appends the tail behind it. The cursor is restored afterwards.
    fn shift_insert(&mut self, index: usize, write: impl FnOnce(&mut Self) -> usize) -> usize {
        if index >= self.capacity {
            tracing::trace!(
                target: TARGET,
                index,
                capacity = self.capacity,
                "insert index out of range"
            );
            return 0;
        }

        let mut tail = scratch::global().acquire();
        tail.extend_from_slice(&self.as_slice()[index..]);

        let saved = self.cursor;
        self.cursor = index;
        let written = write(self);
        self.append_bytes(&tail);
        self.cursor = saved;
        written
    }

    /// Runs `write` with the cursor parked at `index` and restores it.
    ///
    /// An index past the end parks the cursor at `capacity`, which every
    /// mode treats exactly like "full".
    fn at_cursor(&mut self, index: usize, write: impl FnOnce(&mut Self) -> usize) -> usize {
        let saved = self.cursor;
        self.cursor = index.min(self.capacity);
        let written = write(self);
        self.cursor = saved;
        written
    }

    fn write_truncate(&mut self, bytes: &[u8]) -> usize {
        let count = bytes.len().min(self.remaining());
        if count < bytes.len() {
            tracing::trace!(
                target: TARGET,
                requested = bytes.len(),
                written = count,
                "append truncated"
            );
        }
        self.copy_at_cursor(&bytes[..count]);
        count
    }

    fn write_skip(&mut self, bytes: &[u8]) -> usize {
        if self.cursor + bytes.len() >= self.capacity {
            tracing::trace!(
                target: TARGET,
                requested = bytes.len(),
                remaining = self.remaining(),
                "append skipped"
            );
            return 0;
        }
        self.copy_at_cursor(bytes);
        bytes.len()
    }

    fn write_ring(&mut self, bytes: &[u8]) -> usize {
        let mut rest = bytes;
        loop {
            if self.cursor == self.capacity {
                tracing::trace!(target: TARGET, pending = rest.len(), "ring wrap");
                self.cursor = 0;
            }
            let count = rest.len().min(self.remaining());
            self.copy_at_cursor(&rest[..count]);
            rest = &rest[count..];
            if rest.is_empty() {
                break;
            }
        }
        bytes.len()
    }

    #[inline]
    fn copy_at_cursor(&mut self, bytes: &[u8]) {
        let start = self.cursor;
        self.as_mut_slice()[start..start + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }
}

/// Renders formatted content into a temporary that is wiped after use.
fn render(args: fmt::Arguments<'_>) -> Result<Zeroizing<String>> {
    let mut rendered = Zeroizing::new(String::new());
    rendered.write_fmt(args)?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferError;

    fn abcd_ranges(mode: OverflowMode) -> ByteBuffer<'static> {
        let mut buf = ByteBuffer::init_new(mode, 20);
        buf.fill_range(0, 5, b'A');
        buf.fill_range(5, 10, b'B');
        buf.fill_range(10, 15, b'C');
        buf.fill_range(15, 20, b'D');
        buf
    }

    #[test]
    fn test_append_byte_modes() {
        let input = b"0123456789ABCDEFGHIJKLMNOPQ";

        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 20);
        for &b in input {
            buf.append_byte(b);
        }
        assert_eq!(buf.as_slice(), &input[..20]);
        assert_eq!(buf.cursor(), 20);

        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 20);
        for &b in input {
            buf.append_byte(b);
        }
        assert_eq!(buf.as_slice(), &input[..20]);

        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 20);
        for &b in input {
            buf.append_byte(b);
        }
        assert_eq!(buf.as_slice(), b"KLMNOPQ789ABCDEFGHIJ");
        assert_eq!(buf.cursor(), 7);
    }

    #[test]
    fn test_ring_single_byte_wrap_sets_cursor_to_one() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 3);
        buf.append_bytes(b"abc");
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.append_byte(b'z'), 1);
        assert_eq!(buf.cursor(), 1);
        assert_eq!(buf.as_slice(), b"zbc");
    }

    #[test]
    fn test_append_bytes_truncate() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 20);
        assert_eq!(buf.append_bytes(b"0123456789"), 10);
        assert_eq!(buf.append_bytes(b"ABCDEF"), 6);
        assert_eq!(&buf.as_slice()[16..], &[0u8; 4]);
        assert_eq!(buf.append_bytes(b"GHIJKLMNOP"), 4);
        assert_eq!(buf.as_slice(), b"0123456789ABCDEFGHIJ");
        assert_eq!(buf.cursor(), 20);
        assert_eq!(buf.append_bytes(b"Q"), 0);
        assert_eq!(buf.as_slice(), b"0123456789ABCDEFGHIJ");
    }

    #[test]
    fn test_append_bytes_skip() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 20);
        assert_eq!(buf.append_bytes(b"0123456789"), 10);
        assert_eq!(buf.append_bytes(b"ABCDEF"), 6);
        assert_eq!(buf.append_bytes(b"GHIJKLMNOP"), 0);

        let mut expected = [0u8; 20];
        expected[..16].copy_from_slice(b"0123456789ABCDEF");
        assert_eq!(buf.as_slice(), &expected);
        assert_eq!(buf.cursor(), 16);
    }

    #[test]
    fn test_skip_drops_exact_fit() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 4);
        assert_eq!(buf.append_bytes(b"abcd"), 0);
        assert_eq!(buf.append_bytes(b"abc"), 3);
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_append_bytes_ring() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 20);
        buf.append_bytes(b"0123456789");
        buf.append_bytes(b"ABCDEF");
        assert_eq!(buf.append_bytes(b"GHIJKLMNOP"), 10);
        assert_eq!(buf.as_slice(), b"KLMNOP6789ABCDEFGHIJ");
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_ring_longer_than_capacity() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 4);
        assert_eq!(buf.append_bytes(b"abcdefghij"), 10);
        assert_eq!(buf.as_slice(), b"ijgh");
        assert_eq!(buf.cursor(), 2);

        buf.clear();
        buf.append_bytes(b"abcdefgh");
        assert_eq!(buf.as_slice(), b"efgh");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_append_fmt() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 20);
        buf.fill_complete(b'A');
        assert_eq!(buf.append_fmt(format_args!("[{:.3}]", 47.222f32)), Ok(8));
        assert_eq!(buf.append_fmt(format_args!("[{}]", "FU")), Ok(4));
        assert_eq!(buf.as_slice(), b"[47.222][FU]AAAAAAAA");
    }

    #[test]
    fn test_fmt_error_leaves_buffer_untouched() {
        struct Broken;
        impl fmt::Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 8);
        assert_eq!(
            buf.append_fmt(format_args!("x{}", Broken)),
            Err(BufferError::Format)
        );
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.as_slice(), &[0u8; 8]);
    }

    #[test]
    fn test_replace_byte() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 20);
        buf.fill_complete(b'A');

        buf.replace_byte(3, b'B');
        buf.append_byte(b'C');
        assert_eq!(buf.replace_byte(20, b'B'), 0);
        buf.replace_byte(9, b'B');
        buf.append_byte(b'C');
        buf.replace_byte(19, b'B');

        assert_eq!(buf.as_slice(), b"CCABAAAAABAAAAAAAAAB");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_replace_bytes() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 20);
        buf.fill_complete(b'A');
        buf.append_bytes(b"0123456789");
        buf.replace_bytes(3, b"VWXYZ");
        buf.append_bytes(b"CCC");
        assert_eq!(buf.as_slice(), b"012VWXYZ89CCCAAAAAAA");

        buf.replace_fmt(3, format_args!("[{:.3}]", 47.222f32)).unwrap();
        buf.replace_fmt(15, format_args!("[{}]", "LOL")).unwrap();
        assert_eq!(buf.as_slice(), b"012[47.222]CCAA[LOL]");
        assert_eq!(buf.cursor(), 13);
    }

    #[test]
    fn test_replace_under_ring_wraps() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 6);
        buf.fill_complete(b'.');
        buf.replace_bytes(4, b"wxyz");
        assert_eq!(buf.as_slice(), b"yz..wx");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_replace_under_skip_drops() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 6);
        buf.fill_complete(b'.');
        assert_eq!(buf.replace_bytes(4, b"wxyz"), 0);
        assert_eq!(buf.as_slice(), b"......");
    }

    #[test]
    fn test_insert_byte() {
        let mut buf = abcd_ranges(OverflowMode::Truncate);
        buf.insert_byte(0, b'E');
        buf.insert_byte(6, b'F');
        buf.insert_byte(19, b'G');
        assert_eq!(buf.insert_byte(29, b'H'), 0);
        assert_eq!(buf.as_slice(), b"EAAAAAFBBBBBCCCCCDDG");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_insert_bytes() {
        let mut buf = abcd_ranges(OverflowMode::Truncate);
        buf.insert_bytes(0, b"EE");
        buf.insert_bytes(6, b"FFF");
        buf.insert_bytes(18, b"GG");
        buf.insert_bytes(29, b"HH");
        assert_eq!(buf.as_slice(), b"EEAAAAFFFABBBBBCCCGG");

        buf.insert_fmt(3, format_args!("[{:.3}]", 47.222f32)).unwrap();
        buf.insert_fmt(13, format_args!("[{}]", "TADA")).unwrap();
        assert_eq!(buf.as_slice(), b"EEA[47.222]AA[TADA]A");
    }

    #[test]
    fn test_insert_restores_cursor() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 10);
        buf.append_bytes(b"abc");
        buf.insert_bytes(1, b"XY");
        assert_eq!(buf.cursor(), 3);
        assert_eq!(&buf.as_slice()[..5], b"aXYbc");
    }

    #[test]
    fn test_insert_under_skip_keeps_content_drops_tail() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 8);
        buf.fill_complete(b'.');
        assert_eq!(buf.insert_bytes(2, b"ab"), 2);
        assert_eq!(buf.as_slice(), b"..ab....");
    }

    #[test]
    fn test_insert_byte_under_skip_at_last_index() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 4);
        buf.append_bytes(b"abc");

        let mut replaced = ByteBuffer::init_new(OverflowMode::Skip, 4);
        replaced.append_bytes(b"abc");
        assert_eq!(replaced.replace_byte(3, b'X'), 1);

        assert_eq!(buf.insert_byte(3, b'X'), 1);
        assert_eq!(buf.as_slice(), b"abcX");
        assert_eq!(buf.as_slice(), replaced.as_slice());
        assert_eq!(buf.cursor(), 3);

        let mut single = ByteBuffer::init_new(OverflowMode::Skip, 1);
        assert_eq!(single.prepend_byte(b'z'), 1);
        assert_eq!(single.as_slice(), b"z");
    }

    #[test]
    fn test_insert_under_skip_drops_tail_whole() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Skip, 8);
        buf.append_bytes(b"abcdef");
        assert_eq!(buf.insert_bytes(2, b"XY"), 2);
        assert_eq!(buf.as_slice(), b"abXYef\0\0");
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn test_insert_under_ring_wraps_tail() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 8);
        buf.append_bytes(b"abcdefgh");
        assert_eq!(buf.insert_bytes(2, b"XY"), 2);
        assert_eq!(buf.as_slice(), b"ghXYcdef");
        assert_eq!(buf.cursor(), 8);

        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 8);
        buf.append_bytes(b"abcdefgh");
        assert_eq!(buf.insert_byte(7, b'Z'), 1);
        assert_eq!(buf.as_slice(), b"hbcdefgZ");
    }

    #[test]
    fn test_prepend_under_ring_rotates() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 4);
        buf.append_bytes(b"abcd");
        assert_eq!(buf.prepend_bytes(b"Z"), 1);
        assert_eq!(buf.as_slice(), b"dabc");
        assert_eq!(buf.cursor(), 4);

        buf.prepend_byte(b'Z');
        assert_eq!(buf.as_slice(), b"cZda");
    }

    #[test]
    fn test_prepend_byte() {
        let mut buf = abcd_ranges(OverflowMode::Truncate);
        for b in [b'E', b'F', b'G', b'H'] {
            buf.prepend_byte(b);
        }
        assert_eq!(buf.as_slice(), b"HGFEAAAAABBBBBCCCCCD");
    }

    #[test]
    fn test_prepend_bytes() {
        let mut buf = abcd_ranges(OverflowMode::Truncate);
        for chunk in [b"EE", b"FF", b"GG", b"HH"] {
            buf.prepend_bytes(chunk);
        }
        assert_eq!(buf.as_slice(), b"HHGGFFEEAAAAABBBBBCC");

        buf.prepend_bytes(b"This is a override!!");
        assert_eq!(buf.as_slice(), b"This is a override!!");

        assert_eq!(buf.prepend_bytes(b"This is a override with overflow!!"), 20);
        assert_eq!(buf.as_slice(), b"This is a override w");

        buf.prepend_fmt(format_args!("[{:.3}]", 47.222f32)).unwrap();
        buf.prepend_fmt(format_args!("[{}]", "IN")).unwrap();
        assert_eq!(buf.as_slice(), b"[IN][47.222]This is ");
    }

    #[test]
    fn test_released_buffer_ignores_writes() {
        let mut buf = ByteBuffer::init_new(OverflowMode::Ring, 4);
        buf.release();
        assert_eq!(buf.append_byte(1), 0);
        assert_eq!(buf.append_bytes(b"abc"), 0);
        assert_eq!(buf.replace_bytes(0, b"abc"), 0);
        assert_eq!(buf.insert_bytes(0, b"abc"), 0);
        assert_eq!(buf.prepend_byte(1), 0);
        assert_eq!(buf.cursor(), 0);
    }
}
