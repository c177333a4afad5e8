//! Command handlers
//!
//! Two registries. Remote commands only ever turn into presses; operator
//! commands read and tune the settings and are never reachable from a
//! remote line.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use super::parser::{parse_line, ParsedCommand};
use super::ConsoleError;
use crate::config::{find_param, find_params_matching, PanelConfig, ParamSetError, ParamType, ParamValue, PARAMS};
use crate::morse::Symbol;
use crate::panel::Press;

/// Usage text for remote players.
pub const HELP_MESSAGE: &str = "Transmit a response using 'submit .--...-'. \
Toggle the knob using 'toggle knob'. \
Toggle the morse and binary lights using 'toggle morse' and 'toggle binary'. \
Press the reset button using 'reset'.";

/// Remote command descriptor
pub struct RemoteCommand {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: fn(&ParsedCommand<'_>, &mut Vec<Press>) -> Result<(), ConsoleError>,
}

/// Operator command descriptor
pub struct OperatorCommand {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: fn(&ParsedCommand<'_>, &PanelConfig, &mut dyn Write) -> Result<(), ConsoleError>,
}

/// Commands a remote player may send
pub static REMOTE_COMMANDS: &[RemoteCommand] = &[
    RemoteCommand { name: "reset", brief: "Press the reset button", handler: cmd_reset },
    RemoteCommand { name: "submit", brief: "Transmit a response, e.g. submit .--...-", handler: cmd_submit },
    RemoteCommand { name: "toggle", brief: "Toggle knob, morse or binary", handler: cmd_toggle },
];

/// Commands for whoever runs the host
pub static OPERATOR_COMMANDS: &[OperatorCommand] = &[
    OperatorCommand { name: "help", brief: "List commands", handler: cmd_help },
    OperatorCommand { name: "show", brief: "Show parameters", handler: cmd_show },
    OperatorCommand { name: "set", brief: "Set parameter value", handler: cmd_set },
];

/// Execute a parsed remote command, appending its presses to `presses`.
///
/// An empty line is not a command.
pub fn execute(cmd: &ParsedCommand<'_>, presses: &mut Vec<Press>) -> Result<(), ConsoleError> {
    let handler = REMOTE_COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(cmd, presses)
}

/// Lower-case, parse and execute one remote line. Returns the presses it
/// asks for, in order; none at all on error.
pub fn run_line(line: &str) -> Result<Vec<Press>, ConsoleError> {
    let lowered: String = line.trim().to_ascii_lowercase();
    let cmd = parse_line(&lowered);

    let mut presses = Vec::new();
    execute(&cmd, &mut presses)?;
    Ok(presses)
}

/// Whether `name` is an operator command.
pub fn is_operator_command(name: &str) -> bool {
    OPERATOR_COMMANDS.iter().any(|c| c.name.eq_ignore_ascii_case(name))
}

/// Lower-case, parse and execute one operator line.
pub fn run_operator(line: &str, config: &PanelConfig, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let lowered: String = line.trim().to_ascii_lowercase();
    let cmd = parse_line(&lowered);

    let handler = OPERATOR_COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(&cmd, config, out)
}

// --- Remote commands ---

fn cmd_reset(cmd: &ParsedCommand<'_>, presses: &mut Vec<Press>) -> Result<(), ConsoleError> {
    if cmd.arg_count() != 0 {
        return Err(ConsoleError::InvalidValue);
    }
    presses.push(Press::Reset);
    Ok(())
}

fn cmd_submit(cmd: &ParsedCommand<'_>, presses: &mut Vec<Press>) -> Result<(), ConsoleError> {
    let response = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    if cmd.arg_count() > 1 {
        return Err(ConsoleError::InvalidValue);
    }

    let mut parsed = Vec::with_capacity(response.len());
    for c in response.chars() {
        let press = match Symbol::from_char(c) {
            Some(Symbol::Dot) => Press::Dot,
            Some(Symbol::Dash) => Press::Dash,
            _ => return Err(ConsoleError::InvalidSymbol),
        };
        parsed.push(press);
    }
    presses.extend(parsed);
    Ok(())
}

fn cmd_toggle(cmd: &ParsedCommand<'_>, presses: &mut Vec<Press>) -> Result<(), ConsoleError> {
    let target = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    if cmd.arg_count() > 1 {
        return Err(ConsoleError::InvalidValue);
    }

    let press = match target {
        "knob" => Press::Knob,
        "morse" => Press::MorseSwitch,
        "binary" => Press::BinarySwitch,
        _ => return Err(ConsoleError::UnknownTarget),
    };
    presses.push(press);
    Ok(())
}

// --- Operator commands ---

fn cmd_help(cmd: &ParsedCommand<'_>, _config: &PanelConfig, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        // Help for specific command
        let brief = REMOTE_COMMANDS
            .iter()
            .map(|c| (c.name, c.brief))
            .chain(OPERATOR_COMMANDS.iter().map(|c| (c.name, c.brief)))
            .find(|(n, _)| *n == name)
            .map(|(_, brief)| brief)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", name, brief);
    } else {
        let _ = writeln!(out, "{}", HELP_MESSAGE);
        for c in REMOTE_COMMANDS {
            let _ = writeln!(out, "  {:<8} {}", c.name, c.brief);
        }
        for c in OPERATOR_COMMANDS {
            let _ = writeln!(out, "  {:<8} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_show(cmd: &ParsedCommand<'_>, config: &PanelConfig, out: &mut dyn Write) -> Result<(), ConsoleError> {
    match cmd.arg(0) {
        Some(pattern) => {
            let mut found = false;
            for p in find_params_matching(pattern) {
                let _ = writeln!(out, "{}={}", p.name, p.get(config));
                found = true;
            }
            if !found {
                return Err(ConsoleError::UnknownCommand);
            }
        }
        None => {
            for p in PARAMS {
                let _ = writeln!(out, "{}={}  # {}", p.name, p.get(config), p.brief);
            }
        }
    }
    Ok(())
}

fn cmd_set(cmd: &ParsedCommand<'_>, config: &PanelConfig, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let name = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let param = find_param(name).ok_or(ConsoleError::UnknownCommand)?;

    // Parse value based on type
    let pval = match param.param_type {
        ParamType::Bool => {
            let v = match value {
                "true" | "1" | "on" => true,
                "false" | "0" | "off" => false,
                _ => return Err(ConsoleError::InvalidValue),
            };
            ParamValue::Bool(v)
        }
        ParamType::U32 { .. } => {
            let v: u32 = value.parse().map_err(|_| ConsoleError::InvalidValue)?;
            ParamValue::U32(v)
        }
    };

    param.set(config, pval).map_err(|e| match e {
        ParamSetError::OutOfRange => ConsoleError::OutOfRange,
        ParamSetError::TypeMismatch => ConsoleError::InvalidValue,
    })?;
    let _ = writeln!(out, "{}={}", param.name, param.get(config));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_maps_symbols() {
        assert_eq!(run_line("SUBMIT .-."), Ok(alloc::vec![Press::Dot, Press::Dash, Press::Dot]));
    }

    #[test]
    fn test_submit_rejects_other_characters() {
        assert_eq!(run_line("submit .-x"), Err(ConsoleError::InvalidSymbol));
        assert_eq!(run_line("submit"), Err(ConsoleError::MissingArg));
        assert_eq!(run_line("submit .- .-"), Err(ConsoleError::InvalidValue));
    }

    #[test]
    fn test_toggle_targets() {
        assert_eq!(run_line("toggle knob"), Ok(alloc::vec![Press::Knob]));
        assert_eq!(run_line("toggle Morse"), Ok(alloc::vec![Press::MorseSwitch]));
        assert_eq!(run_line("toggle binary"), Ok(alloc::vec![Press::BinarySwitch]));
        assert_eq!(run_line("toggle foo"), Err(ConsoleError::UnknownTarget));
    }

    #[test]
    fn test_remote_rejects_empty_and_operator_lines() {
        assert_eq!(run_line(""), Err(ConsoleError::UnknownCommand));
        assert_eq!(run_line("   "), Err(ConsoleError::UnknownCommand));
        assert_eq!(run_line("press dot"), Err(ConsoleError::UnknownCommand));
        assert_eq!(run_line("help"), Err(ConsoleError::UnknownCommand));
        assert_eq!(run_line("set colorblind on"), Err(ConsoleError::UnknownCommand));
    }

    #[test]
    fn test_operator_set_and_show() {
        let config = PanelConfig::new();
        let mut out = String::new();
        assert_eq!(run_operator("set morse_tick_ms 100", &config, &mut out), Ok(()));
        assert_eq!(out, "morse_tick_ms=100\n");
        assert_eq!(config.snapshot().morse_tick_us, 100_000);

        assert_eq!(run_operator("set morse_tick_ms 5", &config, &mut out), Err(ConsoleError::OutOfRange));
        assert_eq!(run_operator("set colorblind maybe", &config, &mut out), Err(ConsoleError::InvalidValue));
        assert_eq!(run_operator("submit .-", &config, &mut out), Err(ConsoleError::UnknownCommand));

        out.clear();
        run_operator("show morse*", &config, &mut out).unwrap();
        assert_eq!(out, "morse_tick_ms=100\n");
    }

    #[test]
    fn test_is_operator_command() {
        assert!(is_operator_command("SET"));
        assert!(!is_operator_command("submit"));
    }
}
