//! Console error types

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// E01: Unknown command
    #[error("E01: unknown command")]
    UnknownCommand,
    /// E02: Invalid value format
    #[error("E02: invalid value")]
    InvalidValue,
    /// E03: Missing required argument
    #[error("E03: missing argument")]
    MissingArg,
    /// E04: Value out of allowed range
    #[error("E04: out of range")]
    OutOfRange,
    /// E05: Response contains something other than '.' and '-'
    #[error("E05: invalid symbol")]
    InvalidSymbol,
    /// E06: Toggle target is not knob, morse or binary
    #[error("E06: unknown toggle target")]
    UnknownTarget,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidValue => "E02",
            Self::MissingArg => "E03",
            Self::OutOfRange => "E04",
            Self::InvalidSymbol => "E05",
            Self::UnknownTarget => "E06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::InvalidSymbol => "invalid symbol",
            Self::UnknownTarget => "unknown toggle target",
        }
    }
}
