use std::sync::Arc;

use crate::config::Config;
use crate::llm::RigModel;
use crate::search::SearchTool;

use super::Agent;

const MARKET_RESEARCHER_PERSONA: &str = "\
A seasoned analyst with deep knowledge of cryptocurrency markets. \
Expert in identifying trends and emerging opportunities through data-driven analysis.";

const TECHNICAL_ANALYST_PERSONA: &str = "\
A quantitative analyst with expertise in technical indicators and chart patterns. \
Skilled in using RSI, MACD, and moving averages to provide actionable trade recommendations.";

const NEWS_ANALYST_PERSONA: &str = "\
An expert in analyzing the impact of news and social media on crypto markets. \
Capable of identifying key events that drive market sentiment.";

const REPORT_WRITER_PERSONA: &str = "\
Experienced in crafting detailed financial reports and investment recommendations. \
Specializes in presenting complex analysis in a clear and concise manner.";

pub fn market_researcher(config: &Config, search: Option<Arc<dyn SearchTool>>) -> Arc<Agent> {
    let model = Arc::new(RigModel::new(config, MARKET_RESEARCHER_PERSONA, 0.7));
    Arc::new(Agent::new(
        "Senior Market Research Analyst",
        "Analyze current market conditions, trends, and provide investment insights.",
        search,
        5,
        model,
    ))
}

pub fn technical_analyst(config: &Config, search: Option<Arc<dyn SearchTool>>) -> Arc<Agent> {
    let model = Arc::new(RigModel::new(config, TECHNICAL_ANALYST_PERSONA, 0.7));
    Arc::new(Agent::new(
        "Technical Analysis Specialist",
        "Perform technical analysis and generate trading signals.",
        search,
        5,
        model,
    ))
}

pub fn news_analyst(config: &Config, search: Option<Arc<dyn SearchTool>>) -> Arc<Agent> {
    let model = Arc::new(RigModel::new(config, NEWS_ANALYST_PERSONA, 0.7));
    Arc::new(Agent::new(
        "Crypto News & Sentiment Analyst",
        "Monitor news, social media, and overall market sentiment.",
        search,
        5,
        model,
    ))
}

pub fn report_writer(config: &Config, search: Option<Arc<dyn SearchTool>>) -> Arc<Agent> {
    // Lower temperature keeps the synthesis consistent across sections.
    let model = Arc::new(RigModel::new(config, REPORT_WRITER_PERSONA, 0.3));
    Arc::new(Agent::new(
        "Financial Report Writer",
        "Create comprehensive investment reports with actionable insights.",
        search,
        10,
        model,
    ))
}
