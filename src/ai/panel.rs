//! State of the formula explainer form.

use tracing::{debug, warn};

use super::explain::{ExplainError, Explanation, FormulaExplainer};

/// Shown when an explainer error carries no message of its own.
const FALLBACK_ERROR: &str = "Failed to explain formula. The AI model might be unavailable \
or the input is invalid. Please try again.";

/// Formula input, loading flag, and the last answer or error banner.
#[derive(Debug, Clone, Default)]
pub struct ExplainPanel {
    formula: String,
    explanation: Option<Explanation>,
    loading: bool,
    error: Option<String>,
}

impl ExplainPanel {
    pub fn new(formula: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            ..Self::default()
        }
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn set_formula(&mut self, formula: impl Into<String>) {
        self.formula = formula.into();
    }

    pub fn explanation(&self) -> Option<&Explanation> {
        self.explanation.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The error banner, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ask the explainer about the current formula.
    ///
    /// A blank formula is rejected without calling the explainer. Otherwise
    /// the previous answer is cleared and replaced by the new answer or an
    /// error banner. There is no retry.
    pub async fn submit<E: FormulaExplainer>(&mut self, explainer: &E) {
        if self.formula.trim().is_empty() {
            self.error = Some(ExplainError::EmptyFormula.to_string());
            return;
        }

        self.loading = true;
        self.error = None;
        self.explanation = None;

        match explainer.explain(&self.formula).await {
            Ok(explanation) => {
                debug!(area = %explanation.application_area, "formula explained");
                self.explanation = Some(explanation);
            }
            Err(err) => {
                warn!(%err, "error explaining formula");
                self.fail(err);
            }
        }

        self.loading = false;
    }

    /// Show an error banner in place of an answer.
    pub fn fail(&mut self, err: ExplainError) {
        let message = err.to_string();
        self.error = Some(if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        });
        self.explanation = None;
        self.loading = false;
    }
}
