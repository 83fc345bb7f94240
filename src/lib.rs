//! Keypad calculator with scientific functions and a formula explainer.

pub mod ai;
pub mod calculator;
pub mod config;
pub mod keypad;
