//! Command line parser
//!
//! Simple split on whitespace, max 3 arguments.

/// Parsed command with up to 3 arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Up to 3 arguments
    pub args: [Option<&'a str>; 3],
    /// More tokens followed the third argument
    pub extra: bool,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None, None, None],
            extra: false,
        }
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments, counting any beyond the third.
    pub fn arg_count(&self) -> usize {
        self.args.iter().flatten().count() + usize::from(self.extra)
    }
}

/// Parse a command line into command and arguments.
///
/// Case is left alone; callers lower-case first if they want to.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None, None, None];
    for (i, arg) in parts.by_ref().take(3).enumerate() {
        args[i] = Some(arg);
    }
    let extra = parts.next().is_some();

    ParsedCommand { command, args, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cmd = parse_line("  submit   .--.  ");
        assert_eq!(cmd.command, "submit");
        assert_eq!(cmd.arg(0), Some(".--."));
        assert_eq!(cmd.arg(1), None);
        assert_eq!(cmd.arg_count(), 1);
    }

    #[test]
    fn test_parse_extra_arguments() {
        let cmd = parse_line("set a b c d");
        assert_eq!(cmd.arg(2), Some("c"));
        assert!(cmd.extra);
        assert_eq!(cmd.arg_count(), 4);
    }

    #[test]
    fn test_parse_empty() {
        let cmd = parse_line("   ");
        assert_eq!(cmd.command, "");
        assert_eq!(cmd.arg_count(), 0);
    }
}
