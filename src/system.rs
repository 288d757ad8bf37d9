use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::agents::{market_researcher, news_analyst, report_writer, technical_analyst};
use crate::api::{CoinMarketCapClient, FearGreedClient};
use crate::config::Config;
use crate::crew::Crew;
use crate::models::{CoinRecord, MarketMetrics, PipelineError, ReportParams, SentimentSnapshot};
use crate::report::{compose_report, sentiment_report};
use crate::search::{SearchTool, SerperClient};
use crate::tasks::{build_tasks, CrewAgents, TaskRecord};

/// Everything one run produced: the final document plus the pieces the caller
/// may want to render separately.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub document: String,
    pub metrics: MarketMetrics,
    pub sentiment: Option<SentimentSnapshot>,
    pub sentiment_summary: String,
    pub transcript: Vec<TaskRecord>,
    pub generated_at: DateTime<Utc>,
}

/// An empty listings response is unusable; reject it before any agent or
/// task is constructed.
fn require_market_data(records: Vec<CoinRecord>) -> Result<Vec<CoinRecord>, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::DataUnavailable(
            "no market data returned from API".to_string(),
        ));
    }
    Ok(records)
}

/// Wires the data clients, agents, and crew into one report run per call.
/// Each run owns its own crew and context; nothing is shared between runs.
pub struct ReportSystem {
    config: Config,
    market: CoinMarketCapClient,
    sentiment: FearGreedClient,
}

impl ReportSystem {
    pub fn new(config: Config) -> Result<Self> {
        let market = CoinMarketCapClient::new(&config)?;
        let sentiment = FearGreedClient::new()?;

        Ok(Self {
            config,
            market,
            sentiment,
        })
    }

    pub async fn generate_report(
        &self,
        params: &ReportParams,
    ) -> Result<GeneratedReport, PipelineError> {
        params.validate()?;

        // Market data failure aborts before any agent is built.
        println!("📊 Fetching current market data...");
        let records = self
            .market
            .listings(params.coin_count)
            .await
            .map_err(|e| PipelineError::DataUnavailable(e.to_string()))?;

        let records = require_market_data(records)?;
        let metrics = MarketMetrics::from_records(&records);

        // Sentiment degrades to a fixed fallback line.
        let sentiment = match self.sentiment.latest().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "sentiment index unavailable");
                None
            }
        };
        let sentiment_summary = sentiment_report(sentiment.as_ref());

        let generated_at = Utc::now();
        let today = generated_at.format("%B %d, %Y").to_string();

        let search: Option<Arc<dyn SearchTool>> = self
            .config
            .serper_api_key
            .as_deref()
            .map(|key| Arc::new(SerperClient::new(key)) as Arc<dyn SearchTool>);

        let agents = CrewAgents {
            researcher: market_researcher(&self.config, search.clone()),
            technical: technical_analyst(&self.config, search.clone()),
            news: news_analyst(&self.config, search.clone()),
            writer: report_writer(&self.config, search),
        };

        let tasks = build_tasks(params, &today, &agents);
        println!("🤖 Running analysis crew ({} tasks)...", tasks.len());

        let mut crew = Crew::new(tasks);
        let output = crew.kickoff().await?;

        let document = compose_report(
            &metrics,
            &output.final_output,
            &today,
            params.note.as_deref(),
        );

        Ok(GeneratedReport {
            document,
            metrics,
            sentiment,
            sentiment_summary,
            transcript: output.transcript,
            generated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listings_are_rejected_as_data_unavailable() {
        let err = require_market_data(Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::DataUnavailable(_)));
    }

    #[test]
    fn non_empty_listings_pass_through_unchanged() {
        let records = vec![CoinRecord {
            name: "Bitcoin".to_string(),
            symbol: "BTC".to_string(),
            price: 97000.5,
            market_cap: 1.9e12,
            volume_24h: 3.2e10,
            percent_change_24h: 1.4,
        }];

        let passed = require_market_data(records).unwrap();
        assert_eq!(passed.len(), 1);
        assert_eq!(passed[0].symbol, "BTC");
    }
}
