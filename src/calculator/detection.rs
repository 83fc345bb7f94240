//! Shape detection for calculator expressions.
//!
//! The calculator does not parse arbitrary expressions. Instead the whole
//! trimmed input is matched against a short, ordered list of anchored
//! shapes, and the first shape that matches decides how it is evaluated.
//! Some shapes overlap (`5^2` is both a square and a power), so the order
//! of [`Shape::PRIORITY`] is part of the contract.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// A signed decimal literal, optionally in exponential notation.
///
/// Only ASCII digits are accepted. The exponent marker is a lowercase `e`
/// unless the surrounding pattern is case-insensitive.
const NUMBER: &str = r"[-+]?[0-9]*\.?[0-9]+(?:e[-+]?[0-9]+)?";

lazy_static! {
    /// `sin(90)`, `COS(-45.5)`, `tan(1e2)`
    static ref TRIG: Regex =
        Regex::new(&format!(r"(?i)^(sin|cos|tan)\(({NUMBER})\)$")).unwrap();

    /// `log(100)`, `ln(2.5)`, `sqrt(16)`
    static ref LOG_SQRT: Regex =
        Regex::new(&format!(r"(?i)^(log|ln|sqrt)\(({NUMBER})\)$")).unwrap();

    /// `5^2`
    static ref SQUARE: Regex = Regex::new(&format!(r"^({NUMBER})\^2$")).unwrap();

    /// `2^0.5`
    static ref POWER: Regex = Regex::new(&format!(r"^({NUMBER})\^({NUMBER})$")).unwrap();

    /// `3.14 × 2`, `10÷4`, `-1 - -1`
    static ref BINARY: Regex =
        Regex::new(&format!(r"^({NUMBER})\s*([+\-×÷])\s*({NUMBER})$")).unwrap();

    static ref NUMBER_ONLY: Regex = Regex::new(&format!(r"^{NUMBER}$")).unwrap();
}

/// One of the recognized expression forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `sin`, `cos` or `tan` of a number of degrees.
    Trig,
    /// `log` (base 10), `ln` or `sqrt` of a number.
    LogSqrt,
    /// A number followed by `^2`.
    Square,
    /// `base^exponent`.
    Power,
    /// Two numbers joined by `+`, `-`, `×` or `÷`.
    Binary,
}

impl Shape {
    /// Shapes in the order they are tried.
    pub const PRIORITY: [Shape; 5] = [
        Shape::Trig,
        Shape::LogSqrt,
        Shape::Square,
        Shape::Power,
        Shape::Binary,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::Trig => &TRIG,
            Self::LogSqrt => &LOG_SQRT,
            Self::Square => &SQUARE,
            Self::Power => &POWER,
            Self::Binary => &BINARY,
        }
    }

    /// Match the whole expression against this shape.
    pub fn recognize(self, expression: &str) -> Option<Captures<'_>> {
        self.pattern().captures(expression)
    }

    /// Short lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Trig => "trig",
            Self::LogSqrt => "log-sqrt",
            Self::Square => "square",
            Self::Power => "power",
            Self::Binary => "binary",
        }
    }
}

/// Check whether the text is a single number literal, e.g. `-2.5e3`.
pub fn is_number_literal(text: &str) -> bool {
    NUMBER_ONLY.is_match(text)
}

/// Find the first shape, in priority order, that matches the expression.
pub fn detect_shape(expression: &str) -> Option<(Shape, Captures<'_>)> {
    Shape::PRIORITY
        .iter()
        .find_map(|&shape| shape.recognize(expression).map(|caps| (shape, caps)))
}
