//! Formula explainer.
//!
//! Sends a free-form formula to a language model and reads back what the
//! formula does and where it is used. Failures here are reported on their
//! own channel and never mix with calculator errors.

mod explain;
mod panel;
mod provider;

pub use explain::{
    ExplainError, Explanation, FormulaExplainer, SYSTEM_PROMPT, parse_explanation, user_prompt,
};
pub use panel::ExplainPanel;
pub use provider::{LlmExplainer, parse_backend};
