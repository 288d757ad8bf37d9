use std::env;

use anyhow::{anyhow, Result};

use crate::llm::ModelProvider;

/// Process-wide configuration, read from the environment exactly once at
/// startup and passed by reference afterwards. Business logic never touches
/// `env::var` directly.
#[derive(Debug, Clone)]
pub struct Config {
    pub coinmarketcap_api_key: String,
    pub serper_api_key: Option<String>,
    pub llm_api_key: String,
    pub model_provider: ModelProvider,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let coinmarketcap_api_key = required("COINMARKETCAP_API_KEY")?;

        let model_provider = env::var("MODEL_PROVIDER")
            .ok()
            .and_then(|p| ModelProvider::from_str(&p))
            .unwrap_or(ModelProvider::Gemini);

        let model = env::var("MODEL").unwrap_or_else(|_| model_provider.default_model().to_string());
        let llm_api_key = required(model_provider.api_key_var())?;

        // Without a Serper key agents simply run tool-less.
        let serper_api_key = env::var("SERPER_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(Self {
            coinmarketcap_api_key,
            serper_api_key,
            llm_api_key,
            model_provider,
            model,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow!("Missing environment variable: {}", name))
}
