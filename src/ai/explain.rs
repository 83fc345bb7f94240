//! Formula explanations: the collaborator interface and reply parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instructions sent with every explanation request.
pub const SYSTEM_PROMPT: &str = "You are an expert in explaining numerical formulas. \
You will be given a formula and you will explain what the formula does and what field \
of study it applies to. Reply with a single JSON object with two string fields: \
\"explanation\" and \"applicationArea\".";

/// What the explainer says about a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub explanation: String,
    /// The likely field of application, e.g. "Physics".
    pub application_area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error("Please enter a formula.")]
    EmptyFormula,
    #[error("unknown AI backend `{0}`")]
    UnknownBackend(String),
    #[error("{0}")]
    Backend(String),
    #[error("The AI model returned an empty answer.")]
    EmptyResponse,
    #[error("Could not read the AI model's answer: {0}")]
    MalformedResponse(String),
}

/// Something that can explain a formula.
#[allow(async_fn_in_trait)]
pub trait FormulaExplainer {
    async fn explain(&self, formula: &str) -> Result<Explanation, ExplainError>;
}

/// Message sent as the user turn for a formula.
pub fn user_prompt(formula: &str) -> String {
    format!("Formula: {}", formula.trim())
}

/// Parse a model reply into an [`Explanation`].
///
/// The reply may wrap the JSON object in prose or a code fence; the text
/// between the first `{` and the last `}` is what gets parsed.
pub fn parse_explanation(reply: &str) -> Result<Explanation, ExplainError> {
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(ExplainError::EmptyResponse);
    }

    let json = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => return Err(ExplainError::MalformedResponse("no JSON object found".to_string())),
    };

    let explanation: Explanation = serde_json::from_str(json)
        .map_err(|e| ExplainError::MalformedResponse(e.to_string()))?;

    if explanation.explanation.trim().is_empty() {
        return Err(ExplainError::EmptyResponse);
    }

    Ok(explanation)
}
