//! The assembled panel.
//!
//! Owns one session: the generated [`Puzzle`], the [`SignalScheduler`], the
//! [`ResponseMatcher`] and the strike tally. The host drives it with
//! exactly three kinds of call:
//!
//! - [`Panel::advance`] once per frame, returning the lamps to draw
//! - [`Panel::press`] for every button, returning sound and verdict
//! - [`Panel::activate`] once, when the session starts
//!
//! No callbacks: strikes and passes come back as [`Feedback`] values.

use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;

use crate::config::{PanelConfig, CONFIG};
use crate::console::{self, ConsoleError};
use crate::lamp::LampSample;
use crate::log_globals::{next_panel_number, PANEL_LOG};
use crate::logging::LogStream;
use crate::matcher::{MatchOutcome, ResponseMatcher};
use crate::morse::Symbol;
use crate::puzzle::{Puzzle, PuzzleInputs};
use crate::scheduler::{MorseSource, SignalScheduler};
use crate::strike::{StrikeCode, StrikeLedger};
use crate::{panel_debug, panel_info, panel_warn};

/// Read-only queries answered by the host simulation.
pub trait BombInfo {
    fn serial_number(&self) -> &str;
    fn battery_count(&self) -> u32;
    /// Number of ports present, across all plates.
    fn port_count(&self) -> u32;
}

/// Fixed widget values, for hosts without a live bomb and for tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BombWidgets {
    pub serial: String,
    pub batteries: u32,
    pub ports: u32,
}

impl BombWidgets {
    pub fn new(serial: &str, batteries: u32, ports: u32) -> Self {
        Self { serial: String::from(serial), batteries, ports }
    }
}

impl BombInfo for BombWidgets {
    fn serial_number(&self) -> &str {
        &self.serial
    }

    fn battery_count(&self) -> u32 {
        self.batteries
    }

    fn port_count(&self) -> u32 {
        self.ports
    }
}

/// Panel controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    Dot,
    Dash,
    Reset,
    /// Message/key selector.
    Knob,
    /// Morse lamp enable wire.
    MorseSwitch,
    /// Binary lamps enable wire.
    BinarySwitch,
}

/// Sound effect to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Dot,
    Dash,
    Reset,
    Switch,
}

/// Session-level signal for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Strike,
    Pass,
}

/// What the host should do after an input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Feedback {
    pub sound: Option<Sound>,
    pub verdict: Option<Verdict>,
}

impl Feedback {
    const NONE: Self = Self { sound: None, verdict: None };

    fn sound(sound: Sound) -> Self {
        Self { sound: Some(sound), verdict: None }
    }

    fn verdict(verdict: Verdict) -> Self {
        Self { sound: None, verdict: Some(verdict) }
    }

    pub fn is_strike(&self) -> bool {
        self.verdict == Some(Verdict::Strike)
    }

    pub fn is_pass(&self) -> bool {
        self.verdict == Some(Verdict::Pass)
    }
}

/// Colour of an enable wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireColor {
    On,
    Off,
    Solved,
}

/// One Encrypted Morse panel.
pub struct Panel<'a> {
    puzzle: Puzzle,
    scheduler: SignalScheduler,
    matcher: ResponseMatcher,
    strikes: StrikeLedger,
    config: &'a PanelConfig,
    log: &'a LogStream,
    number: u16,
    clock_us: i64,
    activated: bool,
}

impl Panel<'static> {
    /// Panel on the global [`CONFIG`] and [`PANEL_LOG`].
    pub fn with_globals<B, R>(info: &B, rng: &mut R) -> Self
    where
        B: BombInfo + ?Sized,
        R: Rng + ?Sized,
    {
        Panel::new(info, rng, &CONFIG, &PANEL_LOG)
    }
}

impl<'a> Panel<'a> {
    /// Query the bomb, generate the puzzle and log the solution.
    pub fn new<B, R>(info: &B, rng: &mut R, config: &'a PanelConfig, log: &'a LogStream) -> Self
    where
        B: BombInfo + ?Sized,
        R: Rng + ?Sized,
    {
        let inputs = PuzzleInputs {
            serial: info.serial_number(),
            batteries: info.battery_count(),
            ports: info.port_count(),
        };
        let puzzle = Puzzle::generate(&inputs, rng);

        let panel = Self {
            puzzle,
            scheduler: SignalScheduler::new(),
            matcher: ResponseMatcher::new(),
            strikes: StrikeLedger::new(),
            config,
            log,
            number: next_panel_number(),
            clock_us: 0,
            activated: false,
        };
        panel.log_solution();
        panel
    }

    fn log_solution(&self) {
        let (log, ts, n) = (self.log, self.clock_us, self.number);
        let p = &self.puzzle;

        for c in p.anomalies() {
            panel_warn!(log, ts, n, "Serial character {:?} unrecognized, using consonant-after-O bits", c);
        }
        panel_info!(log, ts, n, "Binary sequence A (received): {}", p.hint_a().render());
        if p.reversed() {
            panel_info!(log, ts, n, "First half of generated binary sequence will be reversed (#batteries = #ports)");
        }
        panel_info!(log, ts, n, "Binary sequence B (generated): {}", p.hint_b().render());
        panel_info!(log, ts, n, "Received message: {}", p.grouping());
        panel_info!(log, ts, n, "Received key: {}", p.key());
        panel_info!(log, ts, n, "Message after binary decryption (first step): {}", p.encrypted_call());
        panel_info!(log, ts, n, "Final message after decryption: {}", p.call());
        panel_info!(log, ts, n, "Correct response: {}", p.response());
    }

    /// Session start. Arms the matcher and starts the lamps.
    pub fn activate(&mut self) {
        if self.activated {
            return;
        }
        self.activated = true;
        self.matcher.arm();
        panel_debug!(self.log, self.clock_us, self.number, "Activated");
    }

    /// One frame of `dt_us` microseconds.
    pub fn advance(&mut self, dt_us: u64) -> LampSample {
        self.clock_us = self.clock_us.saturating_add(i64::try_from(dt_us).unwrap_or(i64::MAX));

        if !self.activated {
            return LampSample::DARK;
        }
        if self.matcher.is_solved() {
            return LampSample::SOLVED;
        }

        let settings = self.config.snapshot();
        self.scheduler.advance(dt_us, &settings, &self.puzzle)
    }

    /// Handle one button press.
    pub fn press(&mut self, press: Press) -> Feedback {
        match press {
            Press::Dot => self.enter(Symbol::Dot),
            Press::Dash => self.enter(Symbol::Dash),
            Press::Reset => {
                if !self.is_solved() {
                    self.scheduler.reset();
                    self.matcher.reset();
                }
                Feedback::sound(Sound::Reset)
            }
            Press::Knob => {
                let source = self.scheduler.toggle_source();
                panel_debug!(self.log, self.clock_us, self.number, "Knob turned to {:?}", source);
                Feedback::sound(Sound::Switch)
            }
            Press::MorseSwitch => {
                if !self.is_solved() {
                    self.scheduler.morse_mut().toggle();
                }
                Feedback::sound(Sound::Switch)
            }
            Press::BinarySwitch => {
                if !self.is_solved() {
                    self.scheduler.binary_mut().toggle();
                }
                Feedback::sound(Sound::Switch)
            }
        }
    }

    fn enter(&mut self, symbol: Symbol) -> Feedback {
        let sound = match symbol {
            Symbol::Dash => Sound::Dash,
            _ => Sound::Dot,
        };

        // Before activation every symbol strikes, even on a solved panel
        if !self.activated {
            return self.premature(symbol);
        }

        match self.matcher.input(symbol, self.puzzle.response_morse()) {
            MatchOutcome::Premature => self.premature(symbol),
            MatchOutcome::Mismatch { index, expected } => {
                panel_info!(
                    self.log,
                    self.clock_us,
                    self.number,
                    "Entered {} as symbol #{}, correct symbol is {}. Strike.",
                    symbol.name(),
                    index + 1,
                    expected.name()
                );
                self.strikes.record(StrikeCode::WrongSymbol, u32::try_from(index).unwrap_or(u32::MAX));
                Feedback::verdict(Verdict::Strike)
            }
            MatchOutcome::Accepted { .. } | MatchOutcome::Ignored => Feedback::sound(sound),
            MatchOutcome::Solved => {
                panel_info!(self.log, self.clock_us, self.number, "Correct response entered, module defused.");
                Feedback { sound: Some(sound), verdict: Some(Verdict::Pass) }
            }
        }
    }

    fn premature(&mut self, symbol: Symbol) -> Feedback {
        panel_debug!(self.log, self.clock_us, self.number, "Pressed {} before activation. Strike.", symbol.name());
        self.strikes.record(StrikeCode::Unarmed, 0);
        Feedback::verdict(Verdict::Strike)
    }

    /// Solve without entering the response. Pass is reported once.
    pub fn force_solve(&mut self) -> Feedback {
        if self.is_solved() {
            return Feedback::NONE;
        }
        panel_info!(self.log, self.clock_us, self.number, "Module solved by remote command.");
        self.matcher.force_solve();
        Feedback::verdict(Verdict::Pass)
    }

    /// Interpret a remote command and apply its presses in order.
    ///
    /// Only `reset`, `submit` and `toggle` are accepted. A malformed or
    /// empty line applies nothing.
    pub fn command(&mut self, line: &str) -> Result<Vec<Feedback>, ConsoleError> {
        let presses = console::run_line(line)?;
        Ok(presses.into_iter().map(|p| self.press(p)).collect())
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn scheduler(&self) -> &SignalScheduler {
        &self.scheduler
    }

    pub fn matcher(&self) -> &ResponseMatcher {
        &self.matcher
    }

    pub fn strikes(&self) -> &StrikeLedger {
        &self.strikes
    }

    /// Log number, as in `[Encrypted Morse #n]`.
    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn is_solved(&self) -> bool {
        self.matcher.is_solved()
    }

    pub fn morse_source(&self) -> MorseSource {
        self.scheduler.source()
    }

    /// Colours of the Morse and binary enable wires.
    pub fn wires(&self) -> [WireColor; 2] {
        let colour = |enabled: bool| {
            if self.is_solved() {
                WireColor::Solved
            } else if enabled {
                WireColor::On
            } else {
                WireColor::Off
            }
        };
        [
            colour(self.scheduler.morse().is_enabled()),
            colour(self.scheduler.binary().is_enabled()),
        ]
    }
}
