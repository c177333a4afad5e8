//! Dual-channel signal scheduler.
//!
//! Pure logic, no hardware dependencies. Turns the puzzle's symbol and bit
//! sequences into timed lamp pulses. Fully testable on host.
//!
//! # Channels
//!
//! - **Morse**: message or key stream, 13 idle sub-ticks between loops.
//!   Dot = 1 on + 1 off, dash = 3 on + 1 off, gap = 4 off.
//! - **Binary**: hint A, 10 idle sub-ticks between loops.
//!   Every bit = 1 on + 1 off; the value is shown by lamp colour.
//!
//! Each channel accumulates frame time and takes one sub-tick step when its
//! configured interval is reached.

use crate::config::PanelSettings;
use crate::lamp::{Lamp, LampSample, FLAG_BINARY_STEP, FLAG_MORSE_STEP};
use crate::morse::Symbol;
use crate::puzzle::{HintSequence, Puzzle, HINT_BITS};

/// Idle sub-ticks before the Morse channel replays.
pub const MORSE_IDLE_TICKS: u8 = 13;

/// Idle sub-ticks before the binary channel replays.
pub const BINARY_IDLE_TICKS: u8 = 10;

/// Shape of one element, in sub-ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    /// Leading sub-ticks with the lamp on.
    pub on: u8,
    /// Total sub-ticks, including the trailing dark ones.
    pub period: u8,
}

impl Pulse {
    pub const SHORT: Self = Self { on: 1, period: 2 };
    pub const LONG: Self = Self { on: 3, period: 4 };
    pub const DARK: Self = Self { on: 0, period: 4 };
}

/// A sequence a channel can play.
pub trait Track {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pulse shape of the element at `position` (`position < len()`).
    fn pulse(&self, position: usize) -> Pulse;
}

impl Track for [Symbol] {
    fn len(&self) -> usize {
        <[Symbol]>::len(self)
    }

    fn pulse(&self, position: usize) -> Pulse {
        match self[position] {
            Symbol::Dot => Pulse::SHORT,
            Symbol::Dash => Pulse::LONG,
            Symbol::Gap => Pulse::DARK,
        }
    }
}

impl Track for HintSequence {
    fn len(&self) -> usize {
        HINT_BITS
    }

    fn pulse(&self, _position: usize) -> Pulse {
        Pulse::SHORT
    }
}

/// Channel FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    /// Dark pause before the sequence starts, `counter` sub-ticks in.
    Idle { counter: u8 },
    /// Showing the element at `position`, `subtick` sub-ticks in.
    Playing { position: usize, subtick: u8 },
}

impl ChannelState {
    pub const START: Self = ChannelState::Idle { counter: 0 };

    /// One sub-tick. Returns the next state and whether the lamp is lit.
    ///
    /// An empty track never leaves idle.
    pub fn step<T: Track + ?Sized>(self, idle_ticks: u8, track: &T) -> (Self, bool) {
        match self {
            ChannelState::Idle { counter } => {
                let counter = counter.saturating_add(1);
                if counter >= idle_ticks && !track.is_empty() {
                    (ChannelState::Playing { position: 0, subtick: 0 }, false)
                } else if counter >= idle_ticks {
                    (Self::START, false)
                } else {
                    (ChannelState::Idle { counter }, false)
                }
            }
            ChannelState::Playing { position, .. } if position >= track.len() => {
                (Self::START, false)
            }
            ChannelState::Playing { position, subtick } => {
                let pulse = track.pulse(position);
                let subtick = subtick + 1;
                let lit = subtick <= pulse.on;

                let next = if subtick < pulse.period {
                    ChannelState::Playing { position, subtick }
                } else if position + 1 < track.len() {
                    ChannelState::Playing { position: position + 1, subtick: 0 }
                } else {
                    Self::START
                };
                (next, lit)
            }
        }
    }

    /// Element index being shown, if playing.
    pub fn position(&self) -> Option<usize> {
        match *self {
            ChannelState::Playing { position, .. } => Some(position),
            ChannelState::Idle { .. } => None,
        }
    }
}

/// One lamp channel: FSM state, frame-time accumulator, enable switch.
#[derive(Clone, Debug)]
pub struct Channel {
    idle_ticks: u8,
    state: ChannelState,
    elapsed_us: u64,
    enabled: bool,
    lit: bool,
    /// Element that produced the current lamp state.
    shown: Option<usize>,
}

impl Channel {
    pub fn new(idle_ticks: u8) -> Self {
        Self {
            idle_ticks,
            state: ChannelState::START,
            elapsed_us: 0,
            enabled: true,
            lit: false,
            shown: None,
        }
    }

    /// Back to the start of the idle pause, lamp dark.
    pub fn reset(&mut self) {
        self.state = ChannelState::START;
        self.elapsed_us = 0;
        self.lit = false;
        self.shown = None;
    }

    /// Disabling darkens the lamp but keeps the position. Re-enabling
    /// restarts from idle.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled && !self.enabled {
            self.reset();
        }
        self.enabled = enabled;
        if !enabled {
            self.lit = false;
        }
    }

    /// Flip the enable switch. Returns the new setting.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Add frame time; step once if `interval_us` has been reached.
    ///
    /// Returns `true` if a step was taken.
    pub fn advance<T: Track + ?Sized>(&mut self, dt_us: u64, interval_us: u32, track: &T) -> bool {
        if !self.enabled {
            self.lit = false;
            return false;
        }

        self.elapsed_us = self.elapsed_us.saturating_add(dt_us);
        if self.elapsed_us < u64::from(interval_us) {
            return false;
        }
        self.elapsed_us = 0;

        self.shown = self.state.position();
        let (next, lit) = self.state.step(self.idle_ticks, track);
        self.state = next;
        self.lit = lit;
        true
    }

    #[inline]
    pub fn state(&self) -> ChannelState {
        self.state
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Lamp is on.
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Element index behind the lit lamp.
    pub fn lit_position(&self) -> Option<usize> {
        if self.lit {
            self.shown
        } else {
            None
        }
    }
}

/// Which stream the Morse lamp plays, chosen by the knob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MorseSource {
    #[default]
    Message,
    Key,
}

impl MorseSource {
    pub fn other(self) -> Self {
        match self {
            MorseSource::Message => MorseSource::Key,
            MorseSource::Key => MorseSource::Message,
        }
    }

    fn lamp(self) -> Lamp {
        match self {
            MorseSource::Message => Lamp::Message,
            MorseSource::Key => Lamp::Key,
        }
    }
}

/// Both lamp channels.
#[derive(Clone, Debug)]
pub struct SignalScheduler {
    morse: Channel,
    binary: Channel,
    source: MorseSource,
}

impl Default for SignalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalScheduler {
    pub fn new() -> Self {
        Self {
            morse: Channel::new(MORSE_IDLE_TICKS),
            binary: Channel::new(BINARY_IDLE_TICKS),
            source: MorseSource::Message,
        }
    }

    /// Advance both channels by one frame and report the lamps.
    pub fn advance(&mut self, dt_us: u64, settings: &PanelSettings, puzzle: &Puzzle) -> LampSample {
        let mut flags = 0;

        let morse_track = match self.source {
            MorseSource::Message => puzzle.message(),
            MorseSource::Key => puzzle.key_morse(),
        };
        if self.morse.advance(dt_us, settings.morse_tick_us, morse_track) {
            flags |= FLAG_MORSE_STEP;
        }

        let hint_a = puzzle.hint_a();
        if self.binary.advance(dt_us, settings.binary_tick_us, hint_a) {
            flags |= FLAG_BINARY_STEP;
        }

        let morse = if self.morse.is_lit() { self.source.lamp() } else { Lamp::Off };

        let binary = match self.binary.lit_position() {
            Some(position) => {
                let bit = hint_a.get(position);
                let colour = Lamp::for_bit(bit);
                if settings.colorblind {
                    let mut lamps = [Lamp::Off; 2];
                    lamps[usize::from(bit)] = colour;
                    lamps
                } else {
                    [colour; 2]
                }
            }
            None => [Lamp::Off; 2],
        };

        LampSample { morse, binary, flags }
    }

    /// Restart both channels from idle.
    pub fn reset(&mut self) {
        self.morse.reset();
        self.binary.reset();
    }

    /// Turn the knob: swap message/key and restart the Morse channel.
    pub fn toggle_source(&mut self) -> MorseSource {
        self.source = self.source.other();
        self.morse.reset();
        self.source
    }

    pub fn source(&self) -> MorseSource {
        self.source
    }

    pub fn morse(&self) -> &Channel {
        &self.morse
    }

    pub fn morse_mut(&mut self) -> &mut Channel {
        &mut self.morse
    }

    pub fn binary(&self) -> &Channel {
        &self.binary
    }

    pub fn binary_mut(&mut self) -> &mut Channel {
        &mut self.binary
    }
}
