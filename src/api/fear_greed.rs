use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::Duration;

use crate::models::SentimentSnapshot;

const FNG_URL: &str = "https://api.alternative.me/fng/";

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngRecord>,
}

#[derive(Debug, Deserialize)]
struct FngRecord {
    value: String,
    value_classification: String,
}

impl FngRecord {
    // The index reports its value as a numeric string.
    fn into_snapshot(self) -> Option<SentimentSnapshot> {
        let value = self.value.parse::<f64>().ok()?;
        Some(SentimentSnapshot {
            value,
            classification: self.value_classification,
        })
    }
}

/// Crypto Fear & Greed index client. Callers treat any failure as a soft
/// degrade, never a report failure.
pub struct FearGreedClient {
    client: Client,
}

impl FearGreedClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
        })
    }

    pub async fn latest(&self) -> Result<Option<SentimentSnapshot>> {
        let response = self
            .client
            .get(FNG_URL)
            .query(&[("limit", "1")])
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send sentiment request")?;

        if !response.status().is_success() {
            bail!("Fear & Greed API error: {}", response.status());
        }

        let body: FngResponse = response
            .json()
            .await
            .context("Failed to parse sentiment response")?;

        Ok(body.data.into_iter().next().and_then(FngRecord::into_snapshot))
    }
}
