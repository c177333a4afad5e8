//! Remote command console.
//!
//! Turns short text commands into panel presses. A rejected line
//! produces no presses at all. A separate operator surface inspects and
//! tunes the lamp timing for the host.

pub mod commands;
pub mod error;
pub mod parser;

pub use commands::{
    execute, is_operator_command, run_line, run_operator, OPERATOR_COMMANDS, REMOTE_COMMANDS, HELP_MESSAGE,
};
pub use error::ConsoleError;
pub use parser::{parse_line, ParsedCommand};
