//! Module: config
//!
//! Purpose: Settings surface for the panel.
//!
//! Architecture:
//! - PanelConfig: tick intervals and display mode, one atomic per value
//! - params: descriptor table driving the console `set`/`show` commands
//! - Every write bumps `generation` so readers can spot changes
//!
//! Safety: All access via atomics, no locks. Readers take a
//! [`PanelSettings`] snapshot once per frame.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

pub mod params;

pub use params::{
    find_param, find_params_matching, ParamDescriptor, ParamSetError, ParamType,
    ParamValue, PARAMS,
};

/// Default Morse sub-tick, in microseconds.
pub const DEFAULT_MORSE_TICK_US: u32 = 150_000;

/// Default binary sub-tick, in microseconds.
pub const DEFAULT_BINARY_TICK_US: u32 = 200_000;

/// Live panel settings.
pub struct PanelConfig {
    /// Morse channel sub-tick length, in microseconds.
    pub morse_tick_us: AtomicU32,
    /// Binary channel sub-tick length, in microseconds.
    pub binary_tick_us: AtomicU32,
    /// Position-coded binary lamps instead of colour-coded.
    pub colorblind: AtomicBool,
    /// Incremented on every change.
    pub generation: AtomicU16,
}

/// Process-wide settings used when a panel is not given its own.
pub static CONFIG: PanelConfig = PanelConfig::new();

impl PanelConfig {
    pub const fn new() -> Self {
        Self {
            morse_tick_us: AtomicU32::new(DEFAULT_MORSE_TICK_US),
            binary_tick_us: AtomicU32::new(DEFAULT_BINARY_TICK_US),
            colorblind: AtomicBool::new(false),
            generation: AtomicU16::new(0),
        }
    }

    pub fn set_morse_tick_us(&self, us: u32) {
        self.morse_tick_us.store(us, Ordering::Relaxed);
        self.bump();
    }

    pub fn set_binary_tick_us(&self, us: u32) {
        self.binary_tick_us.store(us, Ordering::Relaxed);
        self.bump();
    }

    pub fn set_colorblind(&self, on: bool) {
        self.colorblind.store(on, Ordering::Relaxed);
        self.bump();
    }

    #[inline]
    pub fn generation(&self) -> u16 {
        self.generation.load(Ordering::Acquire)
    }

    /// Consistent-enough copy for one frame.
    #[inline]
    pub fn snapshot(&self) -> PanelSettings {
        PanelSettings {
            morse_tick_us: self.morse_tick_us.load(Ordering::Relaxed),
            binary_tick_us: self.binary_tick_us.load(Ordering::Relaxed),
            colorblind: self.colorblind.load(Ordering::Relaxed),
        }
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain copy of the settings read by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelSettings {
    pub morse_tick_us: u32,
    pub binary_tick_us: u32,
    pub colorblind: bool,
}

impl Default for PanelSettings {
    fn default() -> Self {
        PanelConfig::new().snapshot()
    }
}
