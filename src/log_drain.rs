//! Log output for the host.
//!
//! Renders [`LogEntry`] values as text lines:
//!
//! ```text
//! [   1500000] INFO  [Encrypted Morse #2] Received key: QWERTYUI
//! ```

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Prefix naming the panel in every line.
pub const LOG_PREFIX: &str = "Encrypted Morse";

/// Write one entry as a line.
pub fn write_log_entry(out: &mut dyn Write, entry: &LogEntry) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {:<5} [{} #{}] {}",
        entry.timestamp_us,
        entry.level.as_str(),
        LOG_PREFIX,
        entry.source,
        entry.message()
    )
}

/// Format one entry into `buf`. Returns the bytes written; a line longer
/// than `buf` is cut.
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    crate::logging::format_to_buffer(buf, format_args!("{}", Line(entry)))
}

struct Line<'a>(&'a LogEntry);

impl core::fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_log_entry(f, self.0)
    }
}

/// Drain every pending entry to `out`, then report drops if any.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut written = 0;

    while let Some(entry) = stream.drain() {
        if write_log_entry(out, &entry).is_err() {
            break;
        }
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {} log entries", dropped);
        stream.reset_dropped();
    }

    written
}
