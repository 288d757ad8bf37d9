mod client;
mod error;
mod types;

pub use client::SerperClient;
pub use error::ToolError;
pub use types::SearchHit;

use async_trait::async_trait;

/// External search capability an agent may invoke before generating text.
/// Repeated identical queries are safe to retry; a failure is never fatal to
/// the calling agent, which degrades to tool-less generation.
#[async_trait]
pub trait SearchTool: Send + Sync {
    async fn invoke(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>, ToolError>;
}
