// demos/diagnostics.rs
//! Collecting transform diagnostics into a bounded message list
//!
//! Run with `RUST_LOG=boundbuf=trace` to see overflow events as well.

use boundbuf::diagnostic;
use boundbuf::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boundbuf=warn")),
        )
        .init();

    let mut log = DiagnosticLog::with_config(DiagnosticConfig {
        max_messages: 4,
        max_message_len: 48,
        max_total_bytes: 1024,
        mode: OverflowMode::Truncate,
    });

    let errors = [
        (3, "unexpected end of input"),
        (9, "attribute 'id' redefined"),
        (14, "template 'row' calls itself without a base case and never terminates"),
        (21, "unknown function 'key'"),
        (30, "this one does not fit"),
    ];

    for (line, text) in errors {
        match diagnostic!(log, "line {}: {}", line, text) {
            Ok(()) => {}
            Err(BufferError::TooManyMessages) => {
                println!("Dropped diagnostic for line {} (list full)", line);
            }
            Err(e) => return Err(e),
        }
    }

    println!(
        "{} messages, {} bytes, near full: {}",
        log.len(),
        log.total_bytes(),
        log.is_near_full()
    );

    // Log every message through tracing
    log.emit();

    // Render into a single report buffer
    let mut report = ByteBuffer::init_new(OverflowMode::Truncate, 256);
    log.render_into(&mut report, b"\n");
    println!("\n--- report ---\n{}", String::from_utf8_lossy(report.written()));

    if let Some(oldest) = log.pop_front() {
        println!("\nOldest: {:?}", String::from_utf8_lossy(oldest.written()));
    }

    log.clear();
    println!("Cleared: {} messages", log.len());

    Ok(())
}
