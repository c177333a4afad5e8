//! Global log stream and panel numbering.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::logging::LogStream;

/// Shared stream used when a panel is not given its own.
///
/// Multiple producers (one per panel), single consumer (the host drain).
pub static PANEL_LOG: LogStream = LogStream::new();

static LAST_PANEL_NUMBER: AtomicU16 = AtomicU16::new(0);

/// Number for the next panel, starting at 1.
pub fn next_panel_number() -> u16 {
    LAST_PANEL_NUMBER.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}
