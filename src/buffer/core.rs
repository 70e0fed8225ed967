//! Core buffer record, lifecycle and fill primitives
//!
//! This module provides the fundamental [`ByteBuffer`] type: a fixed-capacity
//! byte region with a write cursor and an [`OverflowMode`]. Storage is either
//! borrowed from the caller or owned by the buffer; owned storage is securely
//! zeroed when the buffer is released or dropped.

use super::mode::OverflowMode;
use crate::error::{BufferError, Result};
use std::fmt;
use zeroize::Zeroize;

/// Maximum buffer size (1GB)
pub const BUF_MAX_SIZE: usize = 1_000_000_000;

/// Who is responsible for the buffer's storage and record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Storage supplied by the caller through [`ByteBuffer::init`].
    Borrowed,
    /// Storage allocated by [`ByteBuffer::init_new`]; the record belongs to the caller.
    OwnedStorage,
    /// Record and storage both allocated by [`ByteBuffer::new`].
    FullyOwned,
}

impl Ownership {
    /// `true` when releasing the buffer frees its storage.
    #[inline]
    pub fn owns_storage(self) -> bool {
        !matches!(self, Self::Borrowed)
    }

    /// `true` when releasing the buffer also frees its record.
    #[inline]
    pub fn owns_self(self) -> bool {
        matches!(self, Self::FullyOwned)
    }
}

pub(crate) enum Storage<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Box<[u8]>),
    Released,
}

impl Storage<'_> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Borrowed(bytes) => &bytes[..],
            Storage::Owned(bytes) => &bytes[..],
            Storage::Released => &[],
        }
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Borrowed(bytes) => &mut bytes[..],
            Storage::Owned(bytes) => &mut bytes[..],
            Storage::Released => Default::default(),
        }
    }
}

/// A fixed-capacity byte buffer with a write cursor and an overflow policy.
///
/// The backing storage always holds exactly [`capacity`](Self::capacity)
/// bytes while the buffer is live. The cursor stays within
/// `0..=capacity`; a cursor equal to the capacity means "full".
///
/// # Examples
///
/// ```
/// use boundbuf::{ByteBuffer, OverflowMode};
///
/// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 8);
/// buf.append_bytes(b"hello");
/// buf.append_bytes(b" world");
/// assert_eq!(buf.as_slice(), b"hello wo");
/// assert_eq!(buf.cursor(), 8);
/// ```
pub struct ByteBuffer<'a> {
    pub(crate) storage: Storage<'a>,
    pub(crate) cursor: usize,
    pub(crate) capacity: usize,
    pub(crate) mode: OverflowMode,
    pub(crate) ownership: Ownership,
}

impl<'a> ByteBuffer<'a> {
    /// Wraps caller-supplied storage. The capacity is the slice length.
    ///
    /// The buffer never frees or zeroes borrowed storage; the borrow keeps it
    /// valid for the buffer's lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode, Ownership};
    ///
    /// let mut raw = [0u8; 20];
    /// let buf = ByteBuffer::init(OverflowMode::Truncate, &mut raw);
    /// assert_eq!(buf.capacity(), 20);
    /// assert_eq!(buf.cursor(), 0);
    /// assert_eq!(buf.ownership(), Ownership::Borrowed);
    /// ```
    pub fn init(mode: OverflowMode, storage: &'a mut [u8]) -> Self {
        let capacity = storage.len();
        Self {
            storage: Storage::Borrowed(storage),
            cursor: 0,
            capacity,
            mode,
            ownership: Ownership::Borrowed,
        }
    }
}

impl ByteBuffer<'static> {
    /// Allocates zeroed internal storage of `capacity` bytes.
    ///
    /// The returned record belongs to the caller; the storage is released
    /// (and securely zeroed) by [`release`](Self::release) or on drop.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`BUF_MAX_SIZE`] (1GB).
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let buf = ByteBuffer::init_new(OverflowMode::Ring, 20);
    /// assert!(buf.owns_storage());
    /// assert!(!buf.owns_self());
    /// ```
    pub fn init_new(mode: OverflowMode, capacity: usize) -> Self {
        assert!(
            capacity <= BUF_MAX_SIZE,
            "Buffer capacity {} exceeds maximum {}",
            capacity,
            BUF_MAX_SIZE
        );
        Self::owned(mode, capacity, Ownership::OwnedStorage)
    }

    /// Non-panicking form of [`init_new`](Self::init_new).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SizeTooBig`] if `capacity` exceeds [`BUF_MAX_SIZE`].
    pub fn try_init_new(mode: OverflowMode, capacity: usize) -> Result<Self> {
        if capacity > BUF_MAX_SIZE {
            return Err(BufferError::SizeTooBig);
        }
        Ok(Self::owned(mode, capacity, Ownership::OwnedStorage))
    }

    /// Allocates both a heap record and its storage.
    ///
    /// Release it with [`free`](Self::free), which also clears the handle.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`BUF_MAX_SIZE`] (1GB).
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut handle = Some(ByteBuffer::new(OverflowMode::Truncate, 20));
    /// assert!(handle.as_ref().unwrap().owns_self());
    ///
    /// ByteBuffer::free(&mut handle);
    /// assert!(handle.is_none());
    /// ```
    pub fn new(mode: OverflowMode, capacity: usize) -> Box<Self> {
        assert!(
            capacity <= BUF_MAX_SIZE,
            "Buffer capacity {} exceeds maximum {}",
            capacity,
            BUF_MAX_SIZE
        );
        Box::new(Self::owned(mode, capacity, Ownership::FullyOwned))
    }

    fn owned(mode: OverflowMode, capacity: usize, ownership: Ownership) -> Self {
        Self {
            storage: Storage::Owned(vec![0; capacity].into_boxed_slice()),
            cursor: 0,
            capacity,
            mode,
            ownership,
        }
    }
}

impl<'a> ByteBuffer<'a> {
    /// Releases the buffer in place.
    ///
    /// Cursor and capacity are reset to zero first; owned storage is then
    /// securely zeroed and freed, borrowed storage is simply let go. Every
    /// later operation on a released buffer is a no-op. Calling this again
    /// does nothing.
    pub fn release(&mut self) {
        self.cursor = 0;
        self.capacity = 0;
        match std::mem::replace(&mut self.storage, Storage::Released) {
            Storage::Owned(mut bytes) => {
                bytes[..].zeroize();
                tracing::debug!(
                    target: "boundbuf::buffer",
                    bytes = bytes.len(),
                    ownership = ?self.ownership,
                    "released owned storage"
                );
            }
            Storage::Borrowed(_) | Storage::Released => {}
        }
    }

    /// Releases the buffer behind `handle`.
    ///
    /// A fully owned record (from [`new`](ByteBuffer::new)) is freed and the
    /// handle becomes `None`; any other record is released in place and
    /// stays in the handle. An empty handle is a no-op.
    pub fn free(handle: &mut Option<Box<ByteBuffer<'a>>>) {
        let Some(buffer) = handle.as_mut() else {
            return;
        };
        buffer.release();
        if buffer.ownership.owns_self() {
            *handle = None;
        }
    }

    /// Returns the fixed capacity (zero once released).
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the position of the next append-family write.
    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::PositionOutOfBounds`] if `cursor` exceeds the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    /// # use boundbuf::BufferError;
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 4);
    /// buf.set_cursor(4)?;
    /// assert!(buf.set_cursor(5).is_err());
    /// # Ok::<(), BufferError>(())
    /// ```
    #[inline]
    pub fn set_cursor(&mut self, cursor: usize) -> Result<()> {
        if cursor > self.capacity {
            return Err(BufferError::PositionOutOfBounds);
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Returns the overflow mode.
    #[inline(always)]
    pub fn mode(&self) -> OverflowMode {
        self.mode
    }

    /// Changes the overflow mode. Existing content is untouched; the new
    /// mode applies from the next append-family call.
    #[inline]
    pub fn set_mode(&mut self, mode: OverflowMode) {
        self.mode = mode;
    }

    /// Returns how the buffer was constructed.
    #[inline(always)]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// `true` if the storage was allocated by the buffer.
    #[inline(always)]
    pub fn owns_storage(&self) -> bool {
        self.ownership.owns_storage()
    }

    /// `true` if the record itself was allocated by [`ByteBuffer::new`].
    #[inline(always)]
    pub fn owns_self(&self) -> bool {
        self.ownership.owns_self()
    }

    /// `true` once [`release`](Self::release) has run.
    #[inline(always)]
    pub fn is_released(&self) -> bool {
        matches!(self.storage, Storage::Released)
    }

    /// Returns all `capacity` bytes, regardless of the cursor.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.storage.bytes()
    }

    /// Returns all `capacity` bytes mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.storage.bytes_mut()
    }

    /// Returns the bytes in front of the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 16);
    /// buf.fill_complete(b'.');
    /// buf.append_bytes(b"abc");
    /// assert_eq!(buf.written(), b"abc");
    /// ```
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.storage.bytes()[..self.cursor]
    }

    /// Overwrites every byte with `byte`. The cursor does not move.
    pub fn fill_complete(&mut self, byte: u8) {
        self.storage.bytes_mut().fill(byte);
    }

    /// Overwrites `[index, capacity)` with `byte`. No-op if `index >= capacity`.
    pub fn fill_to_end(&mut self, index: usize, byte: u8) {
        if index >= self.capacity {
            return;
        }
        self.storage.bytes_mut()[index..].fill(byte);
    }

    /// Overwrites `count` bytes from `start`, clamped to the end of the
    /// buffer. No-op if `start >= capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::{ByteBuffer, OverflowMode};
    ///
    /// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 6);
    /// buf.fill_complete(b'A');
    /// buf.fill_range(4, 10, b'B');
    /// assert_eq!(buf.as_slice(), b"AAAABB");
    /// ```
    pub fn fill_range(&mut self, start: usize, count: usize, byte: u8) {
        if start >= self.capacity {
            return;
        }
        let count = count.min(self.capacity - start);
        self.storage.bytes_mut()[start..start + count].fill(byte);
    }

    /// Securely zeroes all bytes and moves the cursor back to 0.
    pub fn clear(&mut self) {
        self.storage.bytes_mut().zeroize();
        self.cursor = 0;
    }
}

impl AsRef<[u8]> for ByteBuffer<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for ByteBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("ownership", &self.ownership)
            .field("released", &self.is_released())
            .finish()
    }
}

impl Drop for ByteBuffer<'_> {
    fn drop(&mut self) {
        if let Storage::Owned(bytes) = &mut self.storage {
            bytes[..].zeroize();
        }
    }
}
