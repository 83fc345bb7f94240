//! Calculator module for evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Classify an expression against the supported shapes
//! - Evaluate it and format the result for display
//! - Copy results to the clipboard

mod clipboard;
mod detection;
mod evaluation;
mod format;

pub use clipboard::copy_to_clipboard;
pub use detection::{Shape, detect_shape, is_number_literal};
pub use evaluation::{CalcError, CalcResult, evaluate_expression};
pub use format::{format_value, number_to_string};
