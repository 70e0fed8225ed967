//! Bounded list of formatted diagnostic messages.
//!
//! Each message is rendered through the formatted-append path into its own
//! fixed-capacity [`ByteBuffer`], so a runaway message is cut down by the
//! configured [`OverflowMode`] instead of growing without bound. The list
//! itself is capped by message count and by total bytes.

use crate::buffer::{ByteBuffer, OverflowMode};
use crate::error::{BufferError, Result};
use std::collections::VecDeque;
use std::fmt;

/// Limits for a [`DiagnosticLog`].
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// Maximum number of messages held at once
    pub max_messages: usize,
    /// Capacity of each message buffer
    pub max_message_len: usize,
    /// Maximum total bytes across all messages
    pub max_total_bytes: usize,
    /// Overflow mode of each message buffer
    pub mode: OverflowMode,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            max_messages: 256,
            max_message_len: 1024,
            max_total_bytes: 65_536, // 64KB
            mode: OverflowMode::Truncate,
        }
    }
}

/// An ordered list of diagnostic messages.
///
/// Messages are zeroed when removed, cleared, or when the list is dropped.
///
/// # Examples
///
/// ```
/// use boundbuf::prelude::*;
///
/// let mut log = DiagnosticLog::new();
/// boundbuf::diagnostic!(log, "line {}: unexpected '{}'", 12, '<')?;
/// log.push_bytes(b"unterminated element")?;
///
/// let messages: Vec<&[u8]> = log.iter().collect();
/// assert_eq!(messages, [&b"line 12: unexpected '<'"[..], b"unterminated element"]);
/// # Ok::<(), BufferError>(())
/// ```
pub struct DiagnosticLog {
    messages: VecDeque<ByteBuffer<'static>>,
    config: DiagnosticConfig,
    total_bytes: usize,
}

impl DiagnosticLog {
    /// Creates an empty list with default limits.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Creates an empty list with custom limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::prelude::*;
    ///
    /// let log = DiagnosticLog::with_config(DiagnosticConfig {
    ///     max_messages: 8,
    ///     max_message_len: 80,
    ///     max_total_bytes: 512,
    ///     mode: OverflowMode::Truncate,
    /// });
    /// assert!(log.is_empty());
    /// ```
    pub fn with_config(config: DiagnosticConfig) -> Self {
        Self {
            messages: VecDeque::new(),
            config,
            total_bytes: 0,
        }
    }

    /// Returns the configured limits.
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Renders `args` into a new message.
    ///
    /// The [`diagnostic!`](crate::diagnostic) macro builds the arguments.
    ///
    /// # Errors
    ///
    /// - [`BufferError::TooManyMessages`] if the list is at `max_messages`
    /// - [`BufferError::TooManyBytes`] if the message would exceed `max_total_bytes`
    /// - [`BufferError::Format`] if rendering fails
    /// - [`BufferError::SizeTooBig`] if `max_message_len` is above the buffer limit
    ///
    /// A failed push leaves the list unchanged.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut message = self.message_buffer()?;
        message.append_fmt(args)?;
        self.admit(message)
    }

    /// Copies `bytes` into a new message.
    ///
    /// # Errors
    ///
    /// Same as [`push_fmt`](Self::push_fmt), minus formatting failures.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let mut message = self.message_buffer()?;
        message.append_bytes(bytes);
        self.admit(message)
    }

    /// Number of messages held.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// `true` if no message is held.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total message bytes held.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Returns `true` once either limit is more than 80% used.
    pub fn is_near_full(&self) -> bool {
        self.messages.len() > self.config.max_messages * 80 / 100
            || self.total_bytes > self.config.max_total_bytes * 80 / 100
    }

    /// Iterates over message contents in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.messages.iter().map(|message| message.written())
    }

    /// Removes and returns the oldest message.
    ///
    /// The message's content is its [`written`](ByteBuffer::written) prefix;
    /// its storage is zeroed when the returned buffer is dropped.
    pub fn pop_front(&mut self) -> Option<ByteBuffer<'static>> {
        let message = self.messages.pop_front()?;
        self.total_bytes = self.total_bytes.saturating_sub(message.cursor());
        Some(message)
    }

    /// Appends every message to `dest`, with `separator` between them.
    ///
    /// Writes follow `dest`'s own overflow mode. Returns the number of bytes
    /// that landed.
    ///
    /// # Examples
    ///
    /// ```
    /// use boundbuf::prelude::*;
    ///
    /// let mut log = DiagnosticLog::new();
    /// log.push_bytes(b"first")?;
    /// log.push_bytes(b"second")?;
    ///
    /// let mut report = ByteBuffer::init_new(OverflowMode::Truncate, 64);
    /// assert_eq!(log.render_into(&mut report, b"; "), 13);
    /// assert_eq!(report.written(), b"first; second");
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn render_into(&self, dest: &mut ByteBuffer<'_>, separator: &[u8]) -> usize {
        let mut written = 0;
        for (index, message) in self.iter().enumerate() {
            if index > 0 {
                written += dest.append_bytes(separator);
            }
            written += dest.append_bytes(message);
        }
        written
    }

    /// Logs every message at `warn` level, oldest first.
    pub fn emit(&self) {
        for (index, message) in self.iter().enumerate() {
            tracing::warn!(
                target: "boundbuf::diagnostics",
                index,
                message = %String::from_utf8_lossy(message)
            );
        }
    }

    /// Releases every message and resets the byte count.
    pub fn clear(&mut self) {
        while let Some(mut message) = self.messages.pop_front() {
            message.release();
        }
        self.total_bytes = 0;
    }

    fn message_buffer(&self) -> Result<ByteBuffer<'static>> {
        if self.messages.len() >= self.config.max_messages {
            return Err(BufferError::TooManyMessages);
        }
        ByteBuffer::try_init_new(self.config.mode, self.config.max_message_len)
    }

    fn admit(&mut self, message: ByteBuffer<'static>) -> Result<()> {
        let len = message.cursor();
        if self.total_bytes + len > self.config.max_total_bytes {
            return Err(BufferError::TooManyBytes);
        }
        self.total_bytes += len;
        self.messages.push_back(message);
        Ok(())
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("len", &self.messages.len())
            .field("total_bytes", &self.total_bytes)
            .field("config", &self.config)
            .finish()
    }
}

impl Drop for DiagnosticLog {
    fn drop(&mut self) {
        self.clear();
    }
}
