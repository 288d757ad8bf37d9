use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agents::Agent;
use crate::models::{FocusMode, ReportParams};

/// One unit of instruction for an agent. Descriptions are fully interpolated
/// at construction time; the orchestrator never sees raw user input.
pub struct Task {
    description: String,
    expected_output: String,
    search_topic: String,
    agent: Arc<Agent>,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        search_topic: impl Into<String>,
        agent: Arc<Agent>,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            search_topic: search_topic.into(),
            agent,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn search_topic(&self) -> &str {
        &self.search_topic
    }

    pub fn agent(&self) -> &Arc<Agent> {
        &self.agent
    }
}

/// One completed task's contribution to the accumulated context. Serialized
/// as-is when a caller persists the transcript for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub role: String,
    pub output: String,
}

/// The four analysts of a report run, in pipeline order.
pub struct CrewAgents {
    pub researcher: Arc<Agent>,
    pub technical: Arc<Agent>,
    pub news: Arc<Agent>,
    pub writer: Arc<Agent>,
}

/// Build the report pipeline: market research, technical analysis, news and
/// sentiment, then synthesis. Declaration order is the dependency order.
pub fn build_tasks(params: &ReportParams, today: &str, agents: &CrewAgents) -> Vec<Task> {
    let market_description = format!(
        "**Report Date:** {today}\n\
         1. Analyze current market conditions and trends over the past {timeframe}.\n\
         2. Focus on the top {coins} cryptocurrencies by market cap.\n\
         3. Identify key market drivers, catalysts, and risks.\n\
         4. Evaluate overall market sentiment and momentum.\n\
         5. Generate price predictions and risk assessments.",
        timeframe = params.timeframe,
        coins = params.coin_count,
    );

    let technical_description = format!(
        "**Report Date:** {today}\n\
         1. Perform technical analysis on the top {coins} cryptocurrencies over the past {timeframe}.\n\
         2. Generate trading signals and identify chart patterns.\n\
         3. Calculate key technical indicators (RSI, MACD, MA).\n\
         4. Identify support and resistance levels.\n\
         5. Provide probability-based trade recommendations.",
        timeframe = params.timeframe,
        coins = params.coin_count,
    );

    let sentiment_description = format!(
        "**Report Date:** {today}\n\
         1. Analyze the latest news and social media sentiment.\n\
         2. Summarize market sentiment trends over the past {timeframe}.\n\
         3. Identify the impact of recent events on market sentiment.",
        timeframe = params.timeframe,
    );

    let mut report_description = format!(
        "**Report Date:** {today}\n\
         1. Synthesize all previous analyses into a final, concise report.\n\
         2. Create an executive summary with key findings and actionable recommendations.\n\
         3. Highlight the most critical market insights from the data and analysis.",
    );
    if params.focus != FocusMode::General {
        report_description.push_str(&format!("\nFocus area: {}.", params.focus));
    }
    if let Some(note) = &params.note {
        report_description.push_str(&format!("\nNote: {}", note));
    }

    vec![
        Task::new(
            market_description,
            "A concise market analysis report summarizing current conditions, trends, \
             price predictions, and risk factors.",
            format!(
                "cryptocurrency market analysis trends past {}",
                params.timeframe
            ),
            agents.researcher.clone(),
        ),
        Task::new(
            technical_description,
            "A concise technical analysis report with key trading signals, \
             support/resistance levels, and indicator summaries.",
            format!(
                "cryptocurrency technical analysis signals top {} coins",
                params.coin_count
            ),
            agents.technical.clone(),
        ),
        Task::new(
            sentiment_description,
            "A brief sentiment analysis summary including overall sentiment scores \
             and key drivers.",
            "cryptocurrency news social media sentiment this week".to_string(),
            agents.news.clone(),
        ),
        Task::new(
            report_description,
            "A final executive report that includes an overview of the current market, \
             key technical insights, sentiment analysis, and recommendations for top \
             long and short-term investment opportunities.",
            "cryptocurrency market outlook investment recommendations".to_string(),
            agents.writer.clone(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerationError, LanguageModel};
    use crate::models::{Cadence, Timeframe};
    use async_trait::async_trait;

    struct NullModel;

    #[async_trait]
    impl LanguageModel for NullModel {
        async fn generate(
            &self,
            _prompt: &str,
            _context: Option<&str>,
        ) -> Result<String, GenerationError> {
            Ok(String::new())
        }
    }

    fn test_agents() -> CrewAgents {
        let agent = |role: &str| Arc::new(Agent::new(role, "goal", None, 5, Arc::new(NullModel)));
        CrewAgents {
            researcher: agent("Senior Market Research Analyst"),
            technical: agent("Technical Analysis Specialist"),
            news: agent("Crypto News & Sentiment Analyst"),
            writer: agent("Financial Report Writer"),
        }
    }

    fn params() -> ReportParams {
        ReportParams {
            timeframe: Timeframe::D7,
            coin_count: 12,
            cadence: Cadence::Min5,
            focus: FocusMode::General,
            note: None,
        }
    }

    #[test]
    fn builds_exactly_four_tasks() {
        let tasks = build_tasks(&params(), "March 01, 2026", &test_agents());
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn descriptions_carry_date_timeframe_and_coin_count() {
        let tasks = build_tasks(&params(), "March 01, 2026", &test_agents());

        for task in &tasks {
            assert!(task.description().contains("March 01, 2026"));
        }
        // Coin count appears where the task scopes itself to the top N coins.
        assert!(tasks[0].description().contains("7D"));
        assert!(tasks[0].description().contains("top 12"));
        assert!(tasks[1].description().contains("7D"));
        assert!(tasks[1].description().contains("top 12"));
        assert!(tasks[2].description().contains("7D"));
    }

    #[test]
    fn note_lands_only_in_the_synthesis_task() {
        let mut p = params();
        p.note = Some("watch the ETF flows".to_string());
        let tasks = build_tasks(&p, "March 01, 2026", &test_agents());

        assert!(tasks[3].description().contains("Note: watch the ETF flows"));
        for task in &tasks[..3] {
            assert!(!task.description().contains("watch the ETF flows"));
        }
    }

    #[test]
    fn focus_mode_annotates_the_synthesis_task() {
        let mut p = params();
        p.focus = FocusMode::Sentiment;
        let tasks = build_tasks(&p, "March 01, 2026", &test_agents());

        assert!(tasks[3].description().contains("Focus area: Sentiment Focused."));

        let general = build_tasks(&params(), "March 01, 2026", &test_agents());
        assert!(!general[3].description().contains("Focus area:"));
    }

    #[test]
    fn task_records_round_trip_through_json() {
        let record = TaskRecord {
            role: "Financial Report Writer".to_string(),
            output: "final synthesis".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: TaskRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back.role, record.role);
        assert_eq!(back.output, record.output);
    }

    #[test]
    fn tasks_are_assigned_in_pipeline_order() {
        let tasks = build_tasks(&params(), "March 01, 2026", &test_agents());
        let roles: Vec<&str> = tasks.iter().map(|t| t.agent().role()).collect();

        assert_eq!(
            roles,
            vec![
                "Senior Market Research Analyst",
                "Technical Analysis Specialist",
                "Crypto News & Sentiment Analyst",
                "Financial Report Writer",
            ]
        );
    }
}
