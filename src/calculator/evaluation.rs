//! Expression evaluation.
//!
//! Dispatches a detected [`Shape`] to its handler, runs the finiteness pass
//! and formats the value for display.

use std::f64::consts::PI;

use regex::Captures;
use thiserror::Error;
use tracing::debug;

use super::detection::{Shape, detect_shape};
use super::format::format_value;

const DEGREES_TO_RADIANS: f64 = PI / 180.0;

/// Named evaluation errors. The display strings are shown to the user as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The expression matches none of the recognized shapes.
    #[error("Error: Syntax")]
    Syntax,
    /// Tangent of an odd multiple of 90 degrees.
    #[error("Error: Undefined")]
    Undefined,
    #[error("Error: Sqrt neg")]
    SqrtNegative,
    #[error("Error: Div by 0")]
    DivisionByZero,
    #[error("Error: NaN")]
    NotANumber,
    #[error("Error: Infinity")]
    Infinity,
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The trimmed expression.
        expression: String,
        /// The raw numeric value.
        value: f64,
        /// The value formatted for display.
        display_result: String,
    },
    /// Evaluation ended in one of the named errors.
    Error {
        /// The trimmed expression.
        expression: String,
        error: CalcError,
        /// Error message to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the error kind, if any.
    pub fn error(&self) -> Option<CalcError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(*error),
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success { display_result, .. } => Some(display_result),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate a calculator expression.
///
/// Returns `None` when the calculator declines to act: the input is blank,
/// has already been evaluated (contains `=`), or ends with an open
/// parenthesis. Anything else yields a [`CalcResult`], with
/// [`CalcError::Syntax`] for input that matches no shape.
pub fn evaluate_expression(input: &str) -> Option<CalcResult> {
    let expression = input.trim().to_string();

    if expression.is_empty() || expression.contains('=') || expression.ends_with('(') {
        debug!(%expression, "declining to evaluate");
        return None;
    }

    let outcome = match detect_shape(&expression) {
        Some((shape, caps)) => {
            debug!(%expression, shape = shape.name(), "matched shape");
            apply(shape, &caps).and_then(check_finite)
        }
        None => Err(CalcError::Syntax),
    };

    Some(match outcome {
        Ok(value) => CalcResult::Success {
            display_result: format_value(value),
            expression,
            value,
        },
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            CalcResult::Error {
                message: error.to_string(),
                expression,
                error,
            }
        }
    })
}

/// Compute the raw value for a matched shape.
fn apply(shape: Shape, caps: &Captures<'_>) -> Result<f64, CalcError> {
    match shape {
        Shape::Trig => {
            let degrees = number(caps, 2)?;
            let radians = degrees * DEGREES_TO_RADIANS;
            match function(caps).as_str() {
                "sin" => Ok(radians.sin()),
                "cos" => Ok(radians.cos()),
                _ if (degrees % 180.0).abs() == 90.0 => Err(CalcError::Undefined),
                _ => Ok(radians.tan()),
            }
        }
        Shape::LogSqrt => {
            let value = number(caps, 2)?;
            match function(caps).as_str() {
                // Non-positive input is left to the finiteness pass.
                "log" => Ok(value.log10()),
                "ln" => Ok(value.ln()),
                _ if value < 0.0 => Err(CalcError::SqrtNegative),
                _ => Ok(value.sqrt()),
            }
        }
        Shape::Square => {
            let value = number(caps, 1)?;
            Ok(value * value)
        }
        Shape::Power => Ok(power(number(caps, 1)?, number(caps, 2)?)),
        Shape::Binary => {
            let left = number(caps, 1)?;
            let right = number(caps, 3)?;
            match caps.get(2).map(|m| m.as_str()) {
                Some("+") => Ok(left + right),
                Some("-") => Ok(left - right),
                Some("×") => Ok(left * right),
                Some("÷") if right == 0.0 => Err(CalcError::DivisionByZero),
                Some("÷") => Ok(left / right),
                _ => Err(CalcError::Syntax),
            }
        }
    }
}

/// General power. Unlike `powf`, `±1` raised to an infinite exponent is NaN.
fn power(base: f64, exponent: f64) -> f64 {
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

fn check_finite(value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        Err(CalcError::NotANumber)
    } else if value.is_infinite() {
        Err(CalcError::Infinity)
    } else {
        Ok(value)
    }
}

fn function(caps: &Captures<'_>) -> String {
    caps.get(1)
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default()
}

fn number(caps: &Captures<'_>, index: usize) -> Result<f64, CalcError> {
    caps.get(index)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(CalcError::Syntax)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> String {
        evaluate_expression(input)
            .map(|result| result.display().to_string())
            .unwrap_or_default()
    }

    fn error_of(input: &str) -> Option<CalcError> {
        evaluate_expression(input).and_then(|result| result.error())
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("2+3"), "5");
        assert_eq!(eval("2 - 5"), "-3");
        assert_eq!(eval("1.5×4"), "6");
        assert_eq!(eval("10÷4"), "2.5");
        assert_eq!(eval("0.1+0.2"), "0.3");
        assert_eq!(eval("1÷3"), "0.3333333333");
        assert_eq!(eval("-2 × -3"), "6");
    }

    #[test]
    fn test_display_rounding_breaks_ties_upward() {
        assert_eq!(eval("1234567890.5+0"), "1234567891");
        assert_eq!(eval("12345678.125+0"), "12345678.13");
        assert_eq!(eval("-12345678.125×1"), "-12345678.13");
    }

    #[test]
    fn test_arithmetic_matches_direct_computation() {
        let operands = [(7.25, 3.5), (-12.0, 0.75), (1e5, 3.0), (0.3, -0.1)];
        for (left, right) in operands {
            for (op, expected) in [
                ("+", left + right),
                ("-", left - right),
                ("×", left * right),
                ("÷", left / right),
            ] {
                let expression = format!("{}{}{}", left, op, right);
                assert_eq!(eval(&expression), format_value(expected), "{expression}");
            }
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5÷0"), "Error: Div by 0");
        assert_eq!(error_of("5÷-0"), Some(CalcError::DivisionByZero));
        assert_eq!(error_of("0÷0.0"), Some(CalcError::DivisionByZero));
    }

    #[test]
    fn test_trig_in_degrees() {
        assert_eq!(eval("sin(90)"), "1");
        assert_eq!(eval("cos(180)"), "-1");
        assert_eq!(eval("tan(45)"), "1");
        assert_eq!(eval("SIN(30)"), "0.5");
        assert_eq!(eval("sin(0)"), "0");
    }

    #[test]
    fn test_tangent_undefined() {
        assert_eq!(eval("tan(90)"), "Error: Undefined");
        assert_eq!(error_of("tan(270)"), Some(CalcError::Undefined));
        assert_eq!(error_of("tan(-90)"), Some(CalcError::Undefined));
        assert_eq!(error_of("tan(450.0)"), Some(CalcError::Undefined));
        assert!(evaluate_expression("tan(180)").unwrap().is_success());
    }

    #[test]
    fn test_logarithms_and_roots() {
        assert_eq!(eval("log(100)"), "2");
        assert_eq!(eval("ln(1)"), "0");
        assert_eq!(eval("sqrt(16)"), "4");
        assert_eq!(eval("sqrt(2)"), "1.414213562");
        assert_eq!(eval("sqrt(-4)"), "Error: Sqrt neg");
    }

    #[test]
    fn test_log_of_non_positive_uses_finiteness_pass() {
        assert_eq!(error_of("log(-1)"), Some(CalcError::NotANumber));
        assert_eq!(error_of("ln(-5)"), Some(CalcError::NotANumber));
        assert_eq!(error_of("log(0)"), Some(CalcError::Infinity));
        assert_eq!(error_of("ln(0)"), Some(CalcError::Infinity));
    }

    #[test]
    fn test_powers() {
        assert_eq!(eval("2^10"), "1024");
        assert_eq!(eval("5^2"), "25");
        assert_eq!(eval("-3^2"), "9");
        assert_eq!(eval("4^0.5"), "2");
        assert_eq!(eval("2^-1"), "0.5");
        assert_eq!(error_of("-8^0.5"), Some(CalcError::NotANumber));
        assert_eq!(error_of("1^1e400"), Some(CalcError::NotANumber));
        assert_eq!(error_of("10^400"), Some(CalcError::Infinity));
    }

    #[test]
    fn test_large_and_small_results() {
        assert_eq!(eval("1e6×1e6"), "1000000000000");
        assert_eq!(eval("1e20×100"), "1e+22");
        assert_eq!(eval("1e-12+0"), "1e-12");
        assert_eq!(eval("sin(180)"), "1.2246467991473532e-16");
    }

    #[test]
    fn test_overflowing_literal_is_infinity() {
        assert_eq!(error_of("1e400+1"), Some(CalcError::Infinity));
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(eval("abc"), "Error: Syntax");
        assert_eq!(error_of("2**3"), Some(CalcError::Syntax));
        assert_eq!(error_of("1+2+3"), Some(CalcError::Syntax));
        assert_eq!(error_of("50%"), Some(CalcError::Syntax));
        assert_eq!(error_of("sin(90"), Some(CalcError::Syntax));
    }

    #[test]
    fn test_declined_input() {
        assert!(evaluate_expression("").is_none());
        assert!(evaluate_expression("   ").is_none());
        assert!(evaluate_expression("sin(").is_none());
        assert!(evaluate_expression("2+3 = 5").is_none());
    }

    #[test]
    fn test_expression_is_trimmed() {
        let result = evaluate_expression("  2+2 ").unwrap();
        assert_eq!(result.expression(), "2+2");
        assert_eq!(result.clipboard(), Some("4"));
    }

    #[test]
    fn test_square_path_is_used_for_caret_two() {
        // Square and power agree here; the dedicated path is what runs.
        match evaluate_expression("1.1^2").unwrap() {
            CalcResult::Success { value, .. } => assert_eq!(value, 1.1 * 1.1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_errors_have_no_clipboard_text() {
        let result = evaluate_expression("sqrt(-1)").unwrap();
        assert!(!result.is_success());
        assert_eq!(result.clipboard(), None);
    }
}
