//! Keypad state for the advanced calculator.
//!
//! The keypad owns two pieces of state: the display line and the
//! expression [`Tape`]. Keys append to the tape while it is accumulating.
//! Once `=` settles it, a number or function key starts a fresh expression
//! and an operator key continues from the displayed result.

mod keys;
mod tape;

pub use keys::{Action, DecimalDigit, Function, Key, KeyError, KeyKind, Operator, parse_actions};
pub use tape::Tape;

use tracing::{debug, trace};

use crate::calculator::{
    CalcError, CalcResult, evaluate_expression, is_number_literal, number_to_string,
};

/// Display shown on a cleared keypad.
const ZERO: &str = "0";

/// Advanced calculator keypad.
#[derive(Clone, Debug)]
pub struct Keypad {
    display: String,
    tape: Tape,
}

impl Default for Keypad {
    fn default() -> Self {
        Self {
            display: ZERO.to_string(),
            tape: Tape::default(),
        }
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main display line.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The expression line shown above the display.
    pub fn history(&self) -> String {
        self.tape.history()
    }

    /// The result of the last successful `=`, while the tape is settled.
    pub fn last_result(&self) -> Option<&CalcResult> {
        self.tape.result()
    }

    pub fn apply(&mut self, action: Action) {
        trace!(?action, "keypad action");
        match action {
            Action::Press(key) => self.press(key),
            Action::Equals => self.equals(),
            Action::ClearAll => self.clear_all(),
            Action::Delete => self.delete(),
            Action::ToggleSign => self.toggle_sign(),
        }
    }

    /// Press a key that inserts text.
    pub fn press(&mut self, key: Key) {
        let symbol = key.symbol();

        if self.tape.is_settled() {
            match key.kind() {
                KeyKind::Number => self.start(symbol.to_string()),
                KeyKind::Function if key.opens_call() => self.start(symbol.to_string()),
                KeyKind::Operator => self.start(format!("{}{}", self.display, symbol)),
                _ => debug!(?key, "key ignored after evaluation"),
            }
            return;
        }

        if let Tape::Accumulating { expression } = &mut self.tape {
            let replaces_zero = self.display == ZERO
                && key != Key::Point
                && !key.opens_call()
                && key.kind() != KeyKind::Operator
                && !expression.ends_with(')');

            if replaces_zero {
                self.display = symbol.to_string();
                *expression = symbol.to_string();
            } else {
                self.display.push_str(symbol);
                expression.push_str(symbol);
            }
        }
    }

    /// Evaluate the expression.
    ///
    /// Does nothing when the tape is already settled or the calculator
    /// declines the expression. A syntax error is shown on the display but
    /// leaves the expression open for editing; every other result settles
    /// the tape.
    pub fn equals(&mut self) {
        let Tape::Accumulating { expression } = &self.tape else {
            return;
        };
        let Some(result) = evaluate_expression(expression) else {
            return;
        };

        self.display = result.display().to_string();
        if result.error() == Some(CalcError::Syntax) {
            return;
        }

        let input = expression.clone();
        self.tape = Tape::Settled { input, result };
        debug!(history = %self.tape.history(), "expression settled");
    }

    /// Reset display and tape.
    pub fn clear_all(&mut self) {
        self.display = ZERO.to_string();
        self.tape = Tape::default();
    }

    /// Remove the last character of the expression, or clear a settled tape.
    pub fn delete(&mut self) {
        if self.tape.is_settled() {
            self.clear_all();
            return;
        }

        if let Tape::Accumulating { expression } = &mut self.tape {
            expression.pop();
            self.display = if expression.is_empty() {
                ZERO.to_string()
            } else {
                expression.clone()
            };
        }
    }

    /// Negate the displayed number.
    ///
    /// Only acts when the display holds a plain number. The expression is
    /// replaced by the negated number when it is that number, or when it is
    /// a settled tape ending in it.
    pub fn toggle_sign(&mut self) {
        if !is_number_literal(&self.display) {
            return;
        }
        let Ok(value) = self.display.parse::<f64>() else {
            return;
        };

        let toggled = number_to_string(-value);
        let history = self.tape.history();
        let follows_display =
            history == self.display || history.ends_with(&format!("= {}", self.display));

        self.display = toggled.clone();
        if follows_display {
            self.tape = Tape::Accumulating {
                expression: toggled,
            };
        }
    }

    fn start(&mut self, expression: String) {
        self.display = expression.clone();
        self.tape = Tape::Accumulating { expression };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keypad: &mut Keypad, line: &str) {
        for action in parse_actions(line).unwrap() {
            keypad.apply(action);
        }
    }

    fn keypad(line: &str) -> Keypad {
        let mut keypad = Keypad::new();
        run(&mut keypad, line);
        keypad
    }

    #[test]
    fn test_equals_settles_tape() {
        let pad = keypad("2 + 3 =");
        assert_eq!(pad.display(), "5");
        assert_eq!(pad.history(), "2+3 = 5");
        assert!(pad.tape().is_settled());
        assert_eq!(pad.last_result().and_then(|r| r.clipboard()), Some("5"));
    }

    #[test]
    fn test_digit_after_settled_starts_fresh() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "7");
        assert_eq!(pad.display(), "7");
        assert_eq!(pad.history(), "7");
        assert!(!pad.tape().is_settled());
    }

    #[test]
    fn test_operator_after_settled_continues() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "+");
        assert_eq!(pad.display(), "5+");
        assert_eq!(pad.history(), "5+");
        run(&mut pad, "1=");
        assert_eq!(pad.display(), "6");
        assert_eq!(pad.history(), "5+1 = 6");
    }

    #[test]
    fn test_function_after_settled_starts_fresh() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "sqrt 16 ) =");
        assert_eq!(pad.display(), "4");
        assert_eq!(pad.history(), "sqrt(16) = 4");
    }

    #[test]
    fn test_square_and_parens_ignored_after_settled() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "sq ( )");
        assert_eq!(pad.display(), "5");
        assert_eq!(pad.history(), "2+3 = 5");
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let pad = keypad("0 5");
        assert_eq!(pad.display(), "5");
        assert_eq!(pad.history(), "5");
    }

    #[test]
    fn test_leading_zero_kept_before_point_and_calls() {
        let pad = keypad(".5+1");
        assert_eq!(pad.display(), "0.5+1");
        assert_eq!(pad.history(), ".5+1");

        let pad = keypad("sin");
        assert_eq!(pad.display(), "0sin(");
        assert_eq!(pad.history(), "sin(");
    }

    #[test]
    fn test_point_expression_evaluates() {
        let pad = keypad(".5+1 =");
        assert_eq!(pad.display(), "1.5");
    }

    #[test]
    fn test_scientific_keys() {
        assert_eq!(keypad("sin 90) =").display(), "1");
        assert_eq!(keypad("5 sq =").display(), "25");
        assert_eq!(keypad("2 pow 10 =").display(), "1024");
        assert_eq!(keypad("log 100 ) =").display(), "2");
        assert_eq!(keypad("pi × 2 =").display(), "6.283185307");
    }

    #[test]
    fn test_syntax_error_keeps_expression_open() {
        let mut pad = keypad("5 % 2 =");
        assert_eq!(pad.display(), "Error: Syntax");
        assert_eq!(pad.history(), "5%2");
        assert!(!pad.tape().is_settled());

        run(&mut pad, "DEL DEL");
        assert_eq!(pad.display(), "5");
        run(&mut pad, "+2=");
        assert_eq!(pad.display(), "7");
    }

    #[test]
    fn test_named_error_settles() {
        let pad = keypad("5÷0=");
        assert_eq!(pad.display(), "Error: Div by 0");
        assert_eq!(pad.history(), "5÷0 = Error: Div by 0");
        assert!(pad.tape().is_settled());
        assert_eq!(pad.last_result().and_then(|r| r.clipboard()), None);
    }

    #[test]
    fn test_equals_is_noop_when_settled_or_declined() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "=");
        assert_eq!(pad.history(), "2+3 = 5");

        let pad = keypad("sin =");
        assert_eq!(pad.display(), "0sin(");
        assert_eq!(pad.history(), "sin(");

        let pad = keypad("=");
        assert_eq!(pad.display(), "0");
    }

    #[test]
    fn test_delete() {
        let mut pad = keypad("12");
        run(&mut pad, "DEL");
        assert_eq!(pad.display(), "1");
        run(&mut pad, "DEL");
        assert_eq!(pad.display(), "0");
        assert_eq!(pad.history(), "");

        let mut pad = keypad("2+3=");
        run(&mut pad, "DEL");
        assert_eq!(pad.display(), "0");
        assert_eq!(pad.history(), "");
    }

    #[test]
    fn test_delete_removes_whole_glyph() {
        let mut pad = keypad("6÷");
        run(&mut pad, "DEL");
        assert_eq!(pad.history(), "6");
    }

    #[test]
    fn test_toggle_sign_on_entry() {
        let mut pad = keypad("5");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "-5");
        assert_eq!(pad.history(), "-5");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "5");
    }

    #[test]
    fn test_toggle_sign_on_result_reopens_tape() {
        let mut pad = keypad("2+3=");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "-5");
        assert_eq!(pad.history(), "-5");
        assert!(!pad.tape().is_settled());
        run(&mut pad, "×2=");
        assert_eq!(pad.display(), "-10");
    }

    #[test]
    fn test_toggle_sign_ignores_non_numbers() {
        let mut pad = keypad("2+");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "2+");

        let mut pad = keypad("5÷0=");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "Error: Div by 0");

        let mut pad = keypad("");
        run(&mut pad, "+/-");
        assert_eq!(pad.display(), "0");
    }

    #[test]
    fn test_clear_all() {
        let mut pad = keypad("9×9");
        run(&mut pad, "AC");
        assert_eq!(pad.display(), "0");
        assert_eq!(pad.history(), "");
    }
}
