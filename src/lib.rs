pub mod agents;
pub mod api;
pub mod config;
pub mod crew;
pub mod llm;
pub mod models;
pub mod report;
pub mod search;
pub mod system;
pub mod tasks;

// Re-export main components
pub use agents::Agent;
pub use api::{CoinMarketCapClient, FearGreedClient};
pub use config::Config;
pub use crew::{Crew, CrewOutput, RunStatus};
pub use llm::{GenerationError, LanguageModel, ModelProvider, RigModel};
pub use models::{
    Cadence, CoinRecord, FocusMode, MarketMetrics, PipelineError, ReportParams,
    SentimentSnapshot, Timeframe,
};
pub use search::{SearchHit, SearchTool, SerperClient, ToolError};
pub use system::{GeneratedReport, ReportSystem};
pub use tasks::{build_tasks, CrewAgents, Task, TaskRecord};
