use serde::{Deserialize, Serialize};

use crate::llm::GenerationError;

/// Analysis window the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    H24,
    D7,
    D30,
    D90,
}

impl Timeframe {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "24H" => Some(Self::H24),
            "7D" => Some(Self::D7),
            "30D" => Some(Self::D30),
            "90D" => Some(Self::D90),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H24 => "24H",
            Self::D7 => "7D",
            Self::D30 => "30D",
            Self::D90 => "90D",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often the caller intends to refresh the report. Carried through for the
/// binary's status output; the pipeline itself runs once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Min1,
    Min5,
    Min15,
}

impl Cadence {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1min" => Some(Self::Min1),
            "5min" => Some(Self::Min5),
            "15min" => Some(Self::Min15),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which angle the synthesis task should lean into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusMode {
    General,
    Technical,
    Sentiment,
    Custom,
}

impl FocusMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(Self::General),
            "technical" => Some(Self::Technical),
            "sentiment" => Some(Self::Sentiment),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General Overview",
            Self::Technical => "In-depth Technical Analysis",
            Self::Sentiment => "Sentiment Focused",
            Self::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for FocusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub const MIN_COIN_COUNT: u32 = 5;
pub const MAX_COIN_COUNT: u32 = 20;

/// Caller-supplied knobs for one report run. Interpolated into the task
/// descriptions at construction time; the orchestrator never sees raw input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportParams {
    pub timeframe: Timeframe,
    pub coin_count: u32,
    pub cadence: Cadence,
    pub focus: FocusMode,
    pub note: Option<String>,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::H24,
            coin_count: 10,
            cadence: Cadence::Min5,
            focus: FocusMode::General,
            note: None,
        }
    }
}

impl ReportParams {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.coin_count < MIN_COIN_COUNT || self.coin_count > MAX_COIN_COUNT {
            return Err(PipelineError::InvalidParams(format!(
                "coin count must be between {} and {}, got {}",
                MIN_COIN_COUNT, MAX_COIN_COUNT, self.coin_count
            )));
        }
        Ok(())
    }
}

/// One coin as returned by the market data API, USD-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinRecord {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub percent_change_24h: f64,
}

/// Summary metrics the report composer needs. Pure functions of the records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub total_market_cap: f64,
    pub total_volume: f64,
    pub avg_change: f64,
}

impl MarketMetrics {
    pub fn from_records(records: &[CoinRecord]) -> Self {
        let total_market_cap = records.iter().map(|c| c.market_cap).sum();
        let total_volume = records.iter().map(|c| c.volume_24h).sum();
        let avg_change = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|c| c.percent_change_24h).sum::<f64>() / records.len() as f64
        };

        Self {
            total_market_cap,
            total_volume,
            avg_change,
        }
    }
}

/// Most recent Fear & Greed index reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    pub value: f64,
    pub classification: String,
}

/// Run-fatal conditions surfaced to the caller. Tool failures never appear
/// here; agents recover from those locally.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    #[error("{role} failed to generate: {source}")]
    GenerationFailed {
        role: String,
        #[source]
        source: GenerationError,
    },

    #[error("crew has no tasks to execute")]
    EmptyPipeline,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(name: &str, market_cap: f64, volume_24h: f64, change: f64) -> CoinRecord {
        CoinRecord {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            price: 1.0,
            market_cap,
            volume_24h,
            percent_change_24h: change,
        }
    }

    #[test]
    fn metrics_sum_caps_and_volumes() {
        let records = vec![coin("btc", 100.0, 40.0, 2.0), coin("eth", 50.0, 10.0, -4.0)];
        let metrics = MarketMetrics::from_records(&records);

        assert_eq!(metrics.total_market_cap, 150.0);
        assert_eq!(metrics.total_volume, 50.0);
    }

    #[test]
    fn metrics_average_change_is_arithmetic_mean() {
        let records = vec![coin("btc", 100.0, 40.0, 2.0), coin("eth", 50.0, 10.0, -4.0)];
        let metrics = MarketMetrics::from_records(&records);

        assert_eq!(metrics.avg_change, -1.0);
    }

    #[test]
    fn metrics_on_empty_records_are_zero() {
        let metrics = MarketMetrics::from_records(&[]);

        assert_eq!(metrics.total_market_cap, 0.0);
        assert_eq!(metrics.total_volume, 0.0);
        assert_eq!(metrics.avg_change, 0.0);
    }

    #[test]
    fn params_reject_out_of_range_coin_count() {
        let mut params = ReportParams::default();
        params.coin_count = 4;
        assert!(matches!(
            params.validate(),
            Err(PipelineError::InvalidParams(_))
        ));

        params.coin_count = 21;
        assert!(params.validate().is_err());

        params.coin_count = 20;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn timeframe_round_trips_labels() {
        for label in ["24H", "7D", "30D", "90D"] {
            let tf = Timeframe::from_str(label).unwrap();
            assert_eq!(tf.as_str(), label);
        }
        assert!(Timeframe::from_str("1Y").is_none());
    }
}
