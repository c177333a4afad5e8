//! Response matcher finite state machine.
//!
//! Checks each dot/dash entered against the expected response, one symbol
//! at a time.
//!
//! ```text
//! Unarmed ──arm()──▶ Awaiting(0) ──match──▶ Awaiting(i+1) ──last──▶ Solved
//!                        ▲                       │
//!                        └──── mismatch/reset ───┘
//! ```

use crate::morse::Symbol;

/// Matcher state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatcherState {
    /// Session not active yet. Any input is a strike.
    Unarmed,
    /// Expecting the symbol at `index`.
    Awaiting { index: usize },
    /// Terminal.
    Solved,
}

/// Result of one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Input before activation. Strike.
    Premature,
    /// Correct symbol; `index` is the next symbol expected.
    Accepted { index: usize },
    /// Correct final symbol. Pass.
    Solved,
    /// Wrong symbol at `index`. Strike; progress lost.
    Mismatch { index: usize, expected: Symbol },
    /// Input after solving. Acknowledged only.
    Ignored,
}

impl MatchOutcome {
    pub fn is_strike(&self) -> bool {
        matches!(self, MatchOutcome::Premature | MatchOutcome::Mismatch { .. })
    }
}

/// Response matcher.
///
/// # Example
///
/// ```
/// use encrypted_morse::matcher::{ResponseMatcher, MatchOutcome};
/// use encrypted_morse::morse::Symbol::{Dot, Dash};
///
/// let expected = [Dot, Dot, Dash];
/// let mut m = ResponseMatcher::new();
/// m.arm();
///
/// assert_eq!(m.input(Dot, &expected), MatchOutcome::Accepted { index: 1 });
/// assert_eq!(m.input(Dot, &expected), MatchOutcome::Accepted { index: 2 });
/// assert_eq!(m.input(Dash, &expected), MatchOutcome::Solved);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ResponseMatcher {
    state: MatcherState,
}

impl Default for ResponseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseMatcher {
    pub const fn new() -> Self {
        Self { state: MatcherState::Unarmed }
    }

    /// Session activation. No effect unless unarmed.
    pub fn arm(&mut self) {
        if self.state == MatcherState::Unarmed {
            self.state = MatcherState::Awaiting { index: 0 };
        }
    }

    /// Feed one symbol. A gap never matches (responses are gap-free).
    pub fn input(&mut self, symbol: Symbol, expected: &[Symbol]) -> MatchOutcome {
        let index = match self.state {
            MatcherState::Unarmed => return MatchOutcome::Premature,
            MatcherState::Solved => return MatchOutcome::Ignored,
            MatcherState::Awaiting { index } => index,
        };

        match expected.get(index) {
            Some(&want) if want == symbol => {
                let next = index + 1;
                if next >= expected.len() {
                    self.state = MatcherState::Solved;
                    MatchOutcome::Solved
                } else {
                    self.state = MatcherState::Awaiting { index: next };
                    MatchOutcome::Accepted { index: next }
                }
            }
            Some(&want) => {
                self.state = MatcherState::Awaiting { index: 0 };
                MatchOutcome::Mismatch { index, expected: want }
            }
            // Nothing left to match
            None => {
                self.state = MatcherState::Solved;
                MatchOutcome::Solved
            }
        }
    }

    /// Back to the first symbol. No effect when unarmed or solved.
    pub fn reset(&mut self) {
        if let MatcherState::Awaiting { .. } = self.state {
            self.state = MatcherState::Awaiting { index: 0 };
        }
    }

    /// Jump straight to solved.
    pub fn force_solve(&mut self) {
        self.state = MatcherState::Solved;
    }

    #[inline]
    pub fn state(&self) -> MatcherState {
        self.state
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.state == MatcherState::Solved
    }
}
