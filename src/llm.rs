use async_trait::async_trait;
use rig::{
    agent::Agent as RigAgent,
    completion::Prompt,
    providers::{gemini, openai},
};

use crate::config::Config;

/// A failed language-model call. Always task-fatal: the orchestrator aborts
/// the run rather than retrying.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Failed(String),

    #[error("model not initialized: {0}")]
    NotInitialized(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelProvider {
    Gemini,
    OpenAI,
}

impl ModelProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAI),
            _ => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.0-flash-exp",
            Self::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "Gemini"),
            Self::OpenAI => write!(f, "OpenAI"),
        }
    }
}

/// Prompt in, text out. Stateless per call and non-deterministic; the trait
/// seam exists so the orchestrator can be exercised without a live provider.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, GenerationError>;
}

/// rig-core backed model binding. The persona preamble and temperature are
/// fixed at construction; one instance serves every call an agent makes.
pub struct RigModel {
    provider: ModelProvider,
    gemini_agent: Option<RigAgent<gemini::completion::CompletionModel>>,
    openai_agent: Option<RigAgent<openai::CompletionModel>>,
}

impl RigModel {
    pub fn new(config: &Config, preamble: &str, temperature: f64) -> Self {
        let (gemini_agent, openai_agent) = match config.model_provider {
            ModelProvider::Gemini => {
                let client = gemini::Client::new(&config.llm_api_key);
                let agent = client
                    .agent(&config.model)
                    .preamble(preamble)
                    .temperature(temperature)
                    .build();

                (Some(agent), None)
            }
            ModelProvider::OpenAI => {
                let client = openai::Client::new(&config.llm_api_key);
                let agent = client
                    .agent(&config.model)
                    .preamble(preamble)
                    .temperature(temperature)
                    .build();

                (None, Some(agent))
            }
        };

        Self {
            provider: config.model_provider,
            gemini_agent,
            openai_agent,
        }
    }
}

#[async_trait]
impl LanguageModel for RigModel {
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, GenerationError> {
        let full_prompt = if let Some(ctx) = context {
            format!("{}\n\nContext:\n{}", prompt, ctx)
        } else {
            prompt.to_string()
        };

        match self.provider {
            ModelProvider::Gemini => {
                let agent = self
                    .gemini_agent
                    .as_ref()
                    .ok_or_else(|| GenerationError::NotInitialized("Gemini".to_string()))?;

                agent
                    .prompt(full_prompt.as_str())
                    .await
                    .map_err(|e| GenerationError::Failed(e.to_string()))
            }
            ModelProvider::OpenAI => {
                let agent = self
                    .openai_agent
                    .as_ref()
                    .ok_or_else(|| GenerationError::NotInitialized("OpenAI".to_string()))?;

                agent
                    .prompt(full_prompt.as_str())
                    .await
                    .map_err(|e| GenerationError::Failed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parsing_is_case_insensitive() {
        assert_eq!(ModelProvider::from_str("gemini"), Some(ModelProvider::Gemini));
        assert_eq!(ModelProvider::from_str("OpenAI"), Some(ModelProvider::OpenAI));
        assert_eq!(ModelProvider::from_str("claude"), None);
    }

    #[test]
    fn providers_have_default_models() {
        assert_eq!(ModelProvider::Gemini.default_model(), "gemini-2.0-flash-exp");
        assert_eq!(ModelProvider::OpenAI.default_model(), "gpt-4o-mini");
    }
}
