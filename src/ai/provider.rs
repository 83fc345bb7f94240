//! Formula explainer backed by a hosted or local language model.

use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use tracing::{debug, warn};

use super::explain::{
    ExplainError, Explanation, FormulaExplainer, SYSTEM_PROMPT, parse_explanation, user_prompt,
};
use crate::config::AiConfig;

/// Map a configured backend name to an `llm` backend.
pub fn parse_backend(name: &str) -> Result<LLMBackend, ExplainError> {
    let backend = match name.trim().to_ascii_lowercase().as_str() {
        "openai" => LLMBackend::OpenAI,
        "anthropic" => LLMBackend::Anthropic,
        "ollama" => LLMBackend::Ollama,
        "deepseek" => LLMBackend::DeepSeek,
        "google" => LLMBackend::Google,
        "groq" => LLMBackend::Groq,
        _ => return Err(ExplainError::UnknownBackend(name.to_string())),
    };
    Ok(backend)
}

pub struct LlmExplainer {
    provider: Box<dyn LLMProvider>,
    model: String,
}

impl LlmExplainer {
    pub fn from_config(config: &AiConfig) -> Result<Self, ExplainError> {
        let backend = parse_backend(&config.backend)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&config.model)
            .max_tokens(config.max_tokens)
            .temperature(config.temperature)
            .system(SYSTEM_PROMPT);

        match config.api_key() {
            Some(key) => builder = builder.api_key(key),
            None => warn!(var = %config.api_key_env, "no API key set for the formula explainer"),
        }
        if let Some(url) = &config.base_url {
            builder = builder.base_url(url);
        }

        let provider = builder
            .build()
            .map_err(|e| ExplainError::Backend(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.model.clone(),
        })
    }
}

impl FormulaExplainer for LlmExplainer {
    async fn explain(&self, formula: &str) -> Result<Explanation, ExplainError> {
        if formula.trim().is_empty() {
            return Err(ExplainError::EmptyFormula);
        }

        let messages = vec![ChatMessage::user().content(user_prompt(formula)).build()];
        debug!(model = %self.model, "requesting formula explanation");

        let response = self
            .provider
            .chat(&messages)
            .await
            .map_err(|e| ExplainError::Backend(e.to_string()))?;

        let reply = response.text().ok_or(ExplainError::EmptyResponse)?;
        parse_explanation(&reply)
    }
}
