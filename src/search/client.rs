use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::error::ToolError;
use super::types::{SearchHit, SerperResponse};
use super::SearchTool;

const SERPER_API_URL: &str = "https://google.serper.dev/search";

/// Web search via the Serper API. One network call per invocation, no state.
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SearchTool for SerperClient {
    async fn invoke(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, ToolError> {
        let response = self
            .client
            .post(SERPER_API_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&json!({ "q": query, "num": max_results }))
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: SerperResponse = response
                    .json()
                    .await
                    .map_err(|e| ToolError::InvalidResponse(e.to_string()))?;

                Ok(body
                    .organic
                    .into_iter()
                    .take(max_results as usize)
                    .map(SearchHit::from)
                    .collect())
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(ToolError::RateLimit),
            _ => {
                let error_text = response.text().await?;
                Err(ToolError::ApiError(error_text))
            }
        }
    }
}
