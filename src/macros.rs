//! `format!`-style front ends for the formatted write operations.

/// Appends formatted text to a [`ByteBuffer`](crate::ByteBuffer).
///
/// Expands to [`ByteBuffer::append_fmt`](crate::ByteBuffer::append_fmt) and
/// evaluates to its `Result<usize>`.
///
/// # Examples
///
/// ```
/// use boundbuf::{append_fmt, ByteBuffer, OverflowMode};
///
/// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 16);
/// append_fmt!(buf, "[{:.3}]", 47.222f32)?;
/// assert_eq!(buf.written(), b"[47.222]");
/// # Ok::<(), boundbuf::BufferError>(())
/// ```
#[macro_export]
macro_rules! append_fmt {
    ($buf:expr, $($arg:tt)*) => {
        $buf.append_fmt(::std::format_args!($($arg)*))
    };
}

/// Writes formatted text at an index, then restores the cursor.
///
/// Expands to [`ByteBuffer::replace_fmt`](crate::ByteBuffer::replace_fmt).
#[macro_export]
macro_rules! replace_fmt {
    ($buf:expr, $index:expr, $($arg:tt)*) => {
        $buf.replace_fmt($index, ::std::format_args!($($arg)*))
    };
}

/// Inserts formatted text at an index.
///
/// Expands to [`ByteBuffer::insert_fmt`](crate::ByteBuffer::insert_fmt).
///
/// # Examples
///
/// ```
/// use boundbuf::{insert_fmt, ByteBuffer, OverflowMode};
///
/// let mut buf = ByteBuffer::init_new(OverflowMode::Truncate, 8);
/// buf.append_bytes(b"ab");
/// insert_fmt!(buf, 1, "{}", 7)?;
/// assert_eq!(&buf.as_slice()[..3], b"a7b");
/// # Ok::<(), boundbuf::BufferError>(())
/// ```
#[macro_export]
macro_rules! insert_fmt {
    ($buf:expr, $index:expr, $($arg:tt)*) => {
        $buf.insert_fmt($index, ::std::format_args!($($arg)*))
    };
}

/// Inserts formatted text at index 0.
#[macro_export]
macro_rules! prepend_fmt {
    ($buf:expr, $($arg:tt)*) => {
        $buf.prepend_fmt(::std::format_args!($($arg)*))
    };
}

/// Pushes a formatted message onto a [`DiagnosticLog`](crate::DiagnosticLog).
#[macro_export]
macro_rules! diagnostic {
    ($log:expr, $($arg:tt)*) => {
        $log.push_fmt(::std::format_args!($($arg)*))
    };
}
