// demos/basic_usage.rs
//! Basic usage example of the buffer module

use boundbuf::prelude::*;
use boundbuf::{append_fmt, insert_fmt};

fn show(label: &str, buf: &ByteBuffer<'_>) {
    println!(
        "{:<28} {:?} (cursor {})",
        label,
        String::from_utf8_lossy(buf.as_slice()),
        buf.cursor()
    );
}

fn main() -> Result<()> {
    println!("=== Overflow Modes ===\n");

    // 1. Same input, three policies
    for mode in [OverflowMode::Truncate, OverflowMode::Skip, OverflowMode::Ring] {
        let mut buf = ByteBuffer::init_new(mode, 20);
        buf.fill_complete(b'.');
        buf.append_bytes(b"0123456789");
        buf.append_bytes(b"ABCDEF");
        let landed = buf.append_bytes(b"GHIJKLMNOP");
        show(&format!("{} (last write: {} bytes)", mode, landed), &buf);
    }

    println!("\n=== Positional Writes ===\n");

    // 2. Caller-supplied storage
    let mut raw = [0u8; 20];
    {
        let mut buf = ByteBuffer::init(OverflowMode::Truncate, &mut raw);
        buf.fill_complete(b'A');
        buf.fill_range(5, 5, b'B');
        show("fill_range(5, 5, 'B')", &buf);

        buf.replace_bytes(0, b"xyz");
        show("replace_bytes(0, \"xyz\")", &buf);

        buf.insert_bytes(3, b"--");
        show("insert_bytes(3, \"--\")", &buf);

        buf.prepend_byte(b'>');
        show("prepend_byte('>')", &buf);

        append_fmt!(buf, "{:.2}", 47.222)?;
        insert_fmt!(buf, 10, "[{}]", 7)?;
        show("formatted append/insert", &buf);
    }
    println!("Borrowed storage after drop: {:?}", String::from_utf8_lossy(&raw));

    println!("\n=== Composition ===\n");

    // 3. Join two buffers into a fully owned one
    let mut left = ByteBuffer::init_new(OverflowMode::Truncate, 5);
    left.append_bytes(b"Hello");
    let mut right = ByteBuffer::init_new(OverflowMode::Truncate, 6);
    right.append_bytes(b", join");

    let mut joined = join_buffer(&left, &right, OverflowMode::Ring);
    if let Some(buf) = joined.as_deref() {
        show("join_buffer", buf);
    }
    ByteBuffer::free(&mut joined);
    println!("Joined buffer freed: {}", joined.is_none());

    println!("\n=== Scratch Pool ===\n");

    // 4. Insert and prepend borrow their tail copy from the global pool
    let stats = boundbuf::scratch::global().stats();
    println!(
        "Global scratch pool: acquired={}, allocated={}, cache_hit_rate={:.1}%",
        stats.acquired,
        stats.allocated,
        stats.cache_hit_rate()
    );

    Ok(())
}
