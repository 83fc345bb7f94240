//! The expression tape: what has been typed, and whether it was evaluated.

use crate::calculator::CalcResult;

/// Expression history of the keypad.
#[derive(Clone, Debug)]
pub enum Tape {
    /// Keys are still being appended to the expression.
    Accumulating { expression: String },
    /// The expression was evaluated; the next key decides what happens to it.
    Settled { input: String, result: CalcResult },
}

impl Default for Tape {
    fn default() -> Self {
        Self::Accumulating {
            expression: String::new(),
        }
    }
}

impl Tape {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }

    /// The tape as shown above the display, e.g. `2+3 = 5`.
    pub fn history(&self) -> String {
        match self {
            Self::Accumulating { expression } => expression.clone(),
            Self::Settled { input, result } => format!("{} = {}", input, result.display()),
        }
    }

    /// The result of the last evaluation, if the tape is settled.
    pub fn result(&self) -> Option<&CalcResult> {
        match self {
            Self::Accumulating { .. } => None,
            Self::Settled { result, .. } => Some(result),
        }
    }
}
