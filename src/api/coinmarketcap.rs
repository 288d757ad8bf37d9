use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::Duration;
use tracing::warn;

use crate::config::Config;
use crate::models::CoinRecord;

const BASE_URL: &str = "https://pro-api.coinmarketcap.com/v1";
const RATE_LIMIT_DELAY: u64 = 60; // Delay in seconds when rate limited

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    data: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    name: String,
    symbol: String,
    quote: Quote,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "USD")]
    usd: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    #[serde(default)]
    price: f64,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    volume_24h: f64,
    #[serde(default)]
    percent_change_24h: f64,
}

impl From<Listing> for CoinRecord {
    fn from(listing: Listing) -> Self {
        Self {
            name: listing.name,
            symbol: listing.symbol,
            price: listing.quote.usd.price,
            market_cap: listing.quote.usd.market_cap,
            volume_24h: listing.quote.usd.volume_24h,
            percent_change_24h: listing.quote.usd.percent_change_24h,
        }
    }
}

/// CoinMarketCap listings client. USD quotes only.
pub struct CoinMarketCapClient {
    client: Client,
    api_key: String,
}

impl CoinMarketCapClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            api_key: config.coinmarketcap_api_key.clone(),
        })
    }

    /// Top `limit` coins by descending market cap.
    pub async fn listings(&self, limit: u32) -> Result<Vec<CoinRecord>> {
        let url = format!("{}/cryptocurrency/listings/latest", BASE_URL);
        let limit = limit.to_string();
        let params = [
            ("start", "1"),
            ("limit", limit.as_str()),
            ("convert", "USD"),
            ("sort", "market_cap"),
            ("sort_dir", "desc"),
        ];

        let mut response = self.send(&url, &params).await?;

        while response.status() == 429 {
            warn!("rate limited by CoinMarketCap, waiting {} seconds", RATE_LIMIT_DELAY);
            tokio::time::sleep(Duration::from_secs(RATE_LIMIT_DELAY)).await;
            response = self.send(&url, &params).await?;
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            bail!("CoinMarketCap API error: {} - {}", status, error_text);
        }

        let body: ListingsResponse = response
            .json()
            .await
            .context("Failed to parse market data response")?;

        Ok(body.data.into_iter().map(CoinRecord::from).collect())
    }

    async fn send(&self, url: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .query(params)
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send market data request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_usd_quotes() {
        let body = serde_json::json!({
            "data": [
                {
                    "name": "Bitcoin",
                    "symbol": "BTC",
                    "quote": {
                        "USD": {
                            "price": 97000.5,
                            "market_cap": 1.9e12,
                            "volume_24h": 3.2e10,
                            "percent_change_24h": 1.4
                        }
                    }
                }
            ]
        });

        let response: ListingsResponse = serde_json::from_value(body).unwrap();
        let records: Vec<CoinRecord> = response.data.into_iter().map(CoinRecord::from).collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "BTC");
        assert_eq!(records[0].price, 97000.5);
        assert_eq!(records[0].percent_change_24h, 1.4);
    }

    #[test]
    fn missing_data_section_parses_as_empty() {
        let response: ListingsResponse =
            serde_json::from_value(serde_json::json!({ "status": {} })).unwrap();
        assert!(response.data.is_empty());
    }
}
