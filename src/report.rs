use crate::models::{MarketMetrics, SentimentSnapshot};

/// Fixed fallback when the Fear & Greed index cannot be reached.
pub const SENTIMENT_FALLBACK: &str = "Live sentiment data is currently unavailable.";

const RECOMMENDATION_FOOTER: &str = "*Recommendation:* Monitor market drivers and adjust \
positions as needed for both long and short-term investments.";

pub fn sentiment_report(snapshot: Option<&SentimentSnapshot>) -> String {
    match snapshot {
        Some(s) => format!(
            "The current Crypto Fear & Greed Index is **{:.0}** ({}). \
             This reflects the overall market sentiment as of now.",
            s.value, s.classification
        ),
        None => SENTIMENT_FALLBACK.to_string(),
    }
}

/// Merge the quantitative summary with the crew's synthesis text. Pure string
/// formatting; every number was computed upstream.
pub fn compose_report(
    metrics: &MarketMetrics,
    synthesis: &str,
    date: &str,
    note: Option<&str>,
) -> String {
    let data_summary = format!(
        "**Market Summary (as of {date}):**\n\n\
         - **Total Market Cap:** ${:.2}B\n\
         - **24h Volume:** ${:.2}B\n\
         - **Average 24h Change:** {:.2}%\n\n",
        metrics.total_market_cap / 1e9,
        metrics.total_volume / 1e9,
        metrics.avg_change,
    );

    let mut report = format!(
        "### Executive Summary for {date}\n\n\
         {data_summary}\
         **Key AI Insights:**\n\
         {synthesis}\n\n\
         {RECOMMENDATION_FOOTER}"
    );

    if let Some(note) = note {
        report.push_str(&format!("\n\n_Note: {note}_"));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> MarketMetrics {
        MarketMetrics {
            total_market_cap: 150_000_000_000.0,
            total_volume: 42_500_000_000.0,
            avg_change: -1.0,
        }
    }

    #[test]
    fn missing_sentiment_uses_fixed_fallback() {
        assert_eq!(sentiment_report(None), SENTIMENT_FALLBACK);
    }

    #[test]
    fn sentiment_report_includes_value_and_classification() {
        let snapshot = SentimentSnapshot {
            value: 71.0,
            classification: "Greed".to_string(),
        };
        let text = sentiment_report(Some(&snapshot));

        assert!(text.contains("**71**"));
        assert!(text.contains("(Greed)"));
    }

    #[test]
    fn report_scales_metrics_to_billions() {
        let report = compose_report(&metrics(), "the market looks fine", "March 01, 2026", None);

        assert!(report.starts_with("### Executive Summary for March 01, 2026"));
        assert!(report.contains("**Total Market Cap:** $150.00B"));
        assert!(report.contains("**24h Volume:** $42.50B"));
        assert!(report.contains("**Average 24h Change:** -1.00%"));
        assert!(report.contains("the market looks fine"));
        assert!(report.contains("*Recommendation:*"));
    }

    #[test]
    fn note_is_appended_when_present() {
        let with_note = compose_report(&metrics(), "body", "March 01, 2026", Some("be careful"));
        assert!(with_note.contains("_Note: be careful_"));

        let without = compose_report(&metrics(), "body", "March 01, 2026", None);
        assert!(!without.contains("_Note:"));
    }
}
