use std::sync::Arc;

use tracing::warn;

use crate::llm::{GenerationError, LanguageModel};
use crate::search::{SearchHit, SearchTool};
use crate::tasks::{Task, TaskRecord};

pub mod roles;

pub use roles::{market_researcher, news_analyst, report_writer, technical_analyst};

/// A role-bound wrapper around a language model with an optional search tool.
/// Immutable once constructed and shared read-only across every task it is
/// assigned to; the persona is carried by the model binding's preamble.
pub struct Agent {
    role: String,
    goal: String,
    search: Option<Arc<dyn SearchTool>>,
    search_results: u32,
    model: Arc<dyn LanguageModel>,
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        search: Option<Arc<dyn SearchTool>>,
        search_results: u32,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            search,
            search_results,
            model,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Run one task: optional search phase, then exactly one model call.
    /// Never mutates pipeline state; the orchestrator owns the context.
    pub async fn execute(
        &self,
        task: &Task,
        context: &[TaskRecord],
    ) -> Result<String, GenerationError> {
        let hits = self.gather_search_results(task).await;
        let prompt = self.compose_prompt(task, &hits);
        let context_block = Self::compose_context(context);

        self.model.generate(&prompt, context_block.as_deref()).await
    }

    /// Tool failures degrade to tool-less generation. Search is an
    /// augmentation, not a hard requirement.
    async fn gather_search_results(&self, task: &Task) -> Vec<SearchHit> {
        let Some(tool) = &self.search else {
            return Vec::new();
        };

        match tool.invoke(task.search_topic(), self.search_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(role = %self.role, error = %e, "search tool unavailable, generating without web results");
                Vec::new()
            }
        }
    }

    fn compose_prompt(&self, task: &Task, hits: &[SearchHit]) -> String {
        let mut prompt = format!(
            "You are {role}.\nGoal: {goal}\n\nTask:\n{description}\n\nExpected output:\n{expected}\n",
            role = self.role,
            goal = self.goal,
            description = task.description(),
            expected = task.expected_output(),
        );

        if !hits.is_empty() {
            prompt.push_str("\nRecent web search results:\n");
            for hit in hits {
                prompt.push_str(&format!("- {}: {} ({})\n", hit.title, hit.snippet, hit.url));
            }
        }

        prompt
    }

    fn compose_context(context: &[TaskRecord]) -> Option<String> {
        if context.is_empty() {
            return None;
        }

        let mut block = String::from("Findings from earlier analysts:\n\n");
        for record in context {
            block.push_str(&format!("[{}]\n{}\n\n", record.role, record.output));
        }

        Some(block)
    }
}
