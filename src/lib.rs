//! # Encrypted Morse
//!
//! Puzzle engine for the Encrypted Morse defusal panel.
//!
//! ## Architecture
//!
//! A [`Panel`] is driven entirely by its host:
//! - [`Panel::advance`] once per frame returns a [`LampSample`]
//! - [`Panel::press`] per button returns a [`Feedback`] (sound, strike, pass)
//! - Randomness comes from a caller-supplied `Rng`, so a seed fixes a session
//!
//! No callbacks and no I/O. Diagnostics go to a lock-free [`LogStream`]
//! that the host drains at leisure.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod console;
pub mod lamp;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod matcher;
pub mod morse;
pub mod panel;
pub mod puzzle;
pub mod scheduler;
pub mod strike;

pub use config::{PanelConfig, CONFIG};
pub use console::ConsoleError;
pub use lamp::{Lamp, LampSample};
pub use logging::LogStream;
pub use matcher::{MatchOutcome, ResponseMatcher};
pub use morse::Symbol;
pub use panel::{BombInfo, BombWidgets, Feedback, Panel, Press, Sound, Verdict, WireColor};
pub use puzzle::{Puzzle, PuzzleInputs};
pub use scheduler::{MorseSource, SignalScheduler};
pub use strike::{StrikeCode, StrikeLedger};
