//! Parameter descriptors for console access to [`PanelConfig`].
//!
//! Tick intervals are exposed in milliseconds; the config stores
//! microseconds.

use super::PanelConfig;

/// Shortest accepted sub-tick, in milliseconds.
pub const MIN_TICK_MS: u32 = 20;

/// Longest accepted sub-tick, in milliseconds.
pub const MAX_TICK_MS: u32 = 2_000;

/// A parameter value as seen by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamValue {
    U32(u32),
    Bool(bool),
}

impl core::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamValue::U32(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Accepted value shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    U32 { min: u32, max: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParamSetError {
    #[error("value has the wrong type")]
    TypeMismatch,
    #[error("value out of range")]
    OutOfRange,
}

/// One settable parameter.
pub struct ParamDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub param_type: ParamType,
    pub get_fn: fn(&PanelConfig) -> ParamValue,
    pub set_fn: fn(&PanelConfig, ParamValue) -> Result<(), ParamSetError>,
}

impl ParamDescriptor {
    /// Type- and range-check `value`, then store it.
    pub fn set(&self, config: &PanelConfig, value: ParamValue) -> Result<(), ParamSetError> {
        match (self.param_type, value) {
            (ParamType::Bool, ParamValue::Bool(_)) => {}
            (ParamType::U32 { min, max }, ParamValue::U32(v)) => {
                if v < min || v > max {
                    return Err(ParamSetError::OutOfRange);
                }
            }
            _ => return Err(ParamSetError::TypeMismatch),
        }
        (self.set_fn)(config, value)
    }

    pub fn get(&self, config: &PanelConfig) -> ParamValue {
        (self.get_fn)(config)
    }
}

/// All console-visible parameters.
pub static PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor {
        name: "morse_tick_ms",
        brief: "Morse lamp sub-tick (ms)",
        param_type: ParamType::U32 { min: MIN_TICK_MS, max: MAX_TICK_MS },
        get_fn: get_morse_tick,
        set_fn: set_morse_tick,
    },
    ParamDescriptor {
        name: "binary_tick_ms",
        brief: "Binary lamp sub-tick (ms)",
        param_type: ParamType::U32 { min: MIN_TICK_MS, max: MAX_TICK_MS },
        get_fn: get_binary_tick,
        set_fn: set_binary_tick,
    },
    ParamDescriptor {
        name: "colorblind",
        brief: "Position-coded binary lamps",
        param_type: ParamType::Bool,
        get_fn: get_colorblind,
        set_fn: set_colorblind,
    },
];

/// Exact name lookup.
pub fn find_param(name: &str) -> Option<&'static ParamDescriptor> {
    PARAMS.iter().find(|p| p.name == name)
}

/// `prefix*` matches every name starting with `prefix`; anything else
/// must match exactly.
pub fn find_params_matching(pattern: &str) -> impl Iterator<Item = &'static ParamDescriptor> + '_ {
    let (prefix, wildcard) = match pattern.strip_suffix('*') {
        Some(prefix) => (prefix, true),
        None => (pattern, false),
    };
    PARAMS
        .iter()
        .filter(move |p| if wildcard { p.name.starts_with(prefix) } else { p.name == prefix })
}

fn get_morse_tick(config: &PanelConfig) -> ParamValue {
    ParamValue::U32(config.snapshot().morse_tick_us / 1_000)
}

fn set_morse_tick(config: &PanelConfig, value: ParamValue) -> Result<(), ParamSetError> {
    match value {
        ParamValue::U32(ms) => {
            config.set_morse_tick_us(ms * 1_000);
            Ok(())
        }
        ParamValue::Bool(_) => Err(ParamSetError::TypeMismatch),
    }
}

fn get_binary_tick(config: &PanelConfig) -> ParamValue {
    ParamValue::U32(config.snapshot().binary_tick_us / 1_000)
}

fn set_binary_tick(config: &PanelConfig, value: ParamValue) -> Result<(), ParamSetError> {
    match value {
        ParamValue::U32(ms) => {
            config.set_binary_tick_us(ms * 1_000);
            Ok(())
        }
        ParamValue::Bool(_) => Err(ParamSetError::TypeMismatch),
    }
}

fn get_colorblind(config: &PanelConfig) -> ParamValue {
    ParamValue::Bool(config.snapshot().colorblind)
}

fn set_colorblind(config: &PanelConfig, value: ParamValue) -> Result<(), ParamSetError> {
    match value {
        ParamValue::Bool(on) => {
            config.set_colorblind(on);
            Ok(())
        }
        ParamValue::U32(_) => Err(ParamSetError::TypeMismatch),
    }
}
