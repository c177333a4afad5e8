//! Diagnostic log for panels.
//!
//! ```text
//! Panel                  LogStream            Host
//! ─────                  ─────────            ────
//!
//! panel_info!() ───────▶ [L0][L1][L2] ──────▶ log_drain::drain_to()
//! no allocation           lock-free           at leisure
//! never blocks            ring buffer
//! ```
//!
//! Every entry carries the number of the panel that wrote it, so several
//! panels can share one stream and still be told apart in the output.
//! Messages are dropped, and counted, when the ring is full.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 120;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 256;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Panel clock in microseconds (sum of frame times).
    pub timestamp_us: i64,
    /// Number of the panel that wrote the entry.
    pub source: u16,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        source: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Build an entry, truncating `msg` to [`MAX_MSG_LEN`] bytes.
    pub fn new(timestamp_us: i64, source: u16, level: LogLevel, msg: &[u8]) -> Self {
        let mut entry = Self::EMPTY;
        let len = msg.len().min(MAX_MSG_LEN);
        entry.timestamp_us = timestamp_us;
        entry.source = source;
        entry.level = level;
        entry.len = len as u8;
        entry.msg[..len].copy_from_slice(&msg[..len]);
        entry
    }

    /// Message text. Truncation may split a multi-byte character; the
    /// valid prefix is returned in that case.
    pub fn message(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogEntry")
            .field("timestamp_us", &self.timestamp_us)
            .field("source", &self.source)
            .field("level", &self.level)
            .field("msg", &self.message())
            .finish()
    }
}

/// Lock-free log stream (multiple producers, single consumer).
///
/// - Producers claim slots with a compare-exchange on the write index
/// - A slot is published by its ready flag once fully written
/// - Push never blocks (drops message if full)
/// - A single consumer drains at leisure, stopping at an unpublished slot
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    ready: [AtomicBool; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Producers claim unique slots by compare-exchange on write_idx and
// write them before setting the slot's ready flag. The single consumer only
// reads a slot after seeing its ready flag, and clears the flag before
// releasing the slot through read_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            ready: [const { AtomicBool::new(false) }; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue an entry. Returns `false` if it was dropped (ring full).
    #[inline]
    pub fn push(&self, entry: LogEntry) -> bool {
        let mut write = self.write_idx.load(Ordering::Acquire);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: the compare-exchange handed this producer a unique index,
        // and the consumer does not touch it until `ready` is set.
        unsafe {
            (*self.entries.get())[idx] = entry;
        }
        self.ready[idx].store(true, Ordering::Release);

        true
    }

    /// Next entry, oldest first. `None` when empty or when the oldest
    /// claimed slot is still being written.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;
        if !self.ready[idx].load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: Single consumer, slot published by its ready flag.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.ready[idx].store(false, Ordering::Relaxed);
        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written. Output past the buffer is cut.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Allocation-free log macro.
///
/// # Example
///
/// ```ignore
/// panel_log!(LogLevel::Info, self.log, self.clock_us, self.number, "Key: {}", key);
/// ```
#[macro_export]
macro_rules! panel_log {
    ($level:expr, $stream:expr, $timestamp:expr, $source:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($crate::logging::LogEntry::new($timestamp, $source, $level, &buf[..len]));
    }};
}

/// Info log.
#[macro_export]
macro_rules! panel_info {
    ($stream:expr, $timestamp:expr, $source:expr, $($arg:tt)*) => {
        $crate::panel_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $source, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! panel_warn {
    ($stream:expr, $timestamp:expr, $source:expr, $($arg:tt)*) => {
        $crate::panel_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $source, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! panel_debug {
    ($stream:expr, $timestamp:expr, $source:expr, $($arg:tt)*) => {
        $crate::panel_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $source, $($arg)*)
    };
}
