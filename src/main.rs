use anyhow::Result;
use colored::Colorize;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crypto_crew::{Cadence, Config, FocusMode, ReportParams, ReportSystem, Timeframe};

fn params_from_env() -> ReportParams {
    let mut params = ReportParams::default();

    if let Some(tf) = std::env::var("REPORT_TIMEFRAME")
        .ok()
        .and_then(|v| Timeframe::from_str(&v))
    {
        params.timeframe = tf;
    }
    if let Some(n) = std::env::var("REPORT_COINS").ok().and_then(|v| v.parse().ok()) {
        params.coin_count = n;
    }
    if let Some(cadence) = std::env::var("REPORT_CADENCE")
        .ok()
        .and_then(|v| Cadence::from_str(&v))
    {
        params.cadence = cadence;
    }
    if let Some(focus) = std::env::var("REPORT_FOCUS")
        .ok()
        .and_then(|v| FocusMode::from_str(&v))
    {
        params.focus = focus;
    }
    params.note = std::env::var("REPORT_NOTE").ok().filter(|s| !s.is_empty());

    params
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 AI Crew for Crypto Market Analysis");
    println!("=================================");

    let config = Config::from_env()?;
    let params = params_from_env();

    println!(
        "⚙️ Timeframe: {} | Coins: {} | Cadence: {} | Focus: {}",
        params.timeframe, params.coin_count, params.cadence, params.focus
    );
    println!("🧠 Model: {} ({})", config.model, config.model_provider);

    let system = ReportSystem::new(config)?;
    let report = system.generate_report(&params).await?;

    println!("\n{}", "✅ Report generated".green());
    println!("\n🎭 {}", report.sentiment_summary);
    println!("\n{}", report.document);

    Ok(())
}
